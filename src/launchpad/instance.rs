//! Launchpad - one token sale plus linear vesting schedule
//!
//! A launchpad never changes after creation. Its phase is a pure function of
//! the block time against the four window boundaries, so nothing has to run
//! when a boundary is crossed.

use odra::prelude::*;
use odra::casper_types::{U256, U512};
use crate::errors::LaunchpadError;

/// Lifecycle phase, derived from block time on every read
#[odra::odra_type]
pub enum LaunchpadPhase {
    /// Before `sale_start`
    Scheduled,
    /// `sale_start <= now < sale_end`
    SaleActive,
    /// `sale_end <= now < vesting_start`
    SaleEnded,
    /// `vesting_start <= now < vesting_end`
    VestingActive,
    /// `now >= vesting_end`
    FullyVested,
}

impl LaunchpadPhase {
    /// True once the sale window has closed
    pub fn is_sale_over(&self) -> bool {
        !matches!(self, LaunchpadPhase::Scheduled | LaunchpadPhase::SaleActive)
    }
}

/// Parameters and provenance of a single launchpad
#[odra::odra_type]
pub struct Launchpad {
    /// Address the launchpad is registered under
    pub address: Address,
    /// Account allowed to collect sale proceeds
    pub owner: Address,
    /// Account that paid the creation fee
    pub creator: Address,
    /// Token sold and vested by this launchpad
    pub sale_token: Address,
    pub beneficiary: Address,
    /// Total allocation subject to sale and vesting
    pub total_amount: U256,
    pub sale_start: u64,
    pub sale_end: u64,
    pub vesting_start: u64,
    pub vesting_end: u64,
    /// Token units allocated per mote paid
    pub ratio: U256,
    pub created_at: u64,
}

impl Launchpad {
    /// Checks amounts and window ordering:
    /// `sale_start < sale_end <= vesting_start < vesting_end`
    pub fn validate(&self) -> Result<(), LaunchpadError> {
        if self.total_amount.is_zero() || self.ratio.is_zero() {
            return Err(LaunchpadError::InvalidParameters);
        }
        if self.sale_start >= self.sale_end
            || self.sale_end > self.vesting_start
            || self.vesting_start >= self.vesting_end
        {
            return Err(LaunchpadError::InvalidParameters);
        }
        Ok(())
    }

    pub fn phase(&self, now: u64) -> LaunchpadPhase {
        if now < self.sale_start {
            LaunchpadPhase::Scheduled
        } else if now < self.sale_end {
            LaunchpadPhase::SaleActive
        } else if now < self.vesting_start {
            LaunchpadPhase::SaleEnded
        } else if now < self.vesting_end {
            LaunchpadPhase::VestingActive
        } else {
            LaunchpadPhase::FullyVested
        }
    }

    /// Portion of `amount` vested at `now`, rounded down.
    pub fn vested(&self, amount: U256, now: u64) -> Result<U256, LaunchpadError> {
        if now <= self.vesting_start {
            return Ok(U256::zero());
        }
        if now >= self.vesting_end {
            return Ok(amount);
        }

        let elapsed = U256::from(now - self.vesting_start);
        let duration = U256::from(self.vesting_end - self.vesting_start);
        amount
            .checked_mul(elapsed)
            .map(|scaled| scaled / duration)
            .ok_or(LaunchpadError::ArithmeticOverflow)
    }

    /// Amount of the whole allocation unlocked at `now`
    pub fn unlocked(&self, now: u64) -> Result<U256, LaunchpadError> {
        self.vested(self.total_amount, now)
    }

    /// Tokens allocated for a payment of `payment` motes (`payment * ratio`)
    pub fn allocation_for(&self, payment: U512) -> Result<U256, LaunchpadError> {
        if payment > U512::from(u128::MAX) {
            return Err(LaunchpadError::ArithmeticOverflow);
        }
        U256::from(payment.as_u128())
            .checked_mul(self.ratio)
            .ok_or(LaunchpadError::ArithmeticOverflow)
    }
}
