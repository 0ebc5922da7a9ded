//! Launchpad contracts for Casper, written with Odra.
//!
//! - `launchpad`: the fee-gated `LaunchpadFactory`, its fee ledger, the
//!   per-instance sale/vesting schedule and the purchase ledger
//! - `token`: a small CEP-18 style token used as a sale token in tests and
//!   deployments
#![cfg_attr(target_arch = "wasm32", no_std)]

extern crate alloc;

pub mod errors;
pub mod events;
pub mod launchpad;
pub mod token;
