//! Launchpad module for fee-gated token sales with linear vesting
//!
//! This module provides:
//! - LaunchpadFactory: Creates launchpads for a fixed fee and records provenance
//! - FeeLedger: Holds creation fees until the factory owner withdraws them
//! - Launchpad: Sale and vesting schedule of a single launchpad
//! - PurchaseLedger: Allocations and claims of launchpad participants

pub mod fee_ledger;
pub mod instance;
pub mod purchases;
pub mod factory;

#[cfg(test)]
pub mod tests;

pub use fee_ledger::*;
pub use instance::*;
pub use purchases::*;
pub use factory::*;
