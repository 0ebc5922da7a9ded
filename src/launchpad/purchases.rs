//! PurchaseLedger - per-launchpad sale, escrow and claim bookkeeping
//!
//! Keeps what each participant bought and claimed, plus per-launchpad
//! totals. Every launchpad has its own token escrow: deposits add to it,
//! claims and reclaims draw from it, and nothing can draw more than that
//! launchpad holds. The ledger moves no value itself; the factory transfers
//! motes and tokens after the ledger has been updated.

use odra::prelude::*;
use odra::casper_types::{U256, U512};
use crate::errors::LaunchpadError;

#[odra::module(errors = LaunchpadError)]
pub struct PurchaseLedger {
    /// (launchpad, participant) -> tokens allocated
    allocations: Mapping<(Address, Address), U256>,
    /// (launchpad, participant) -> tokens already claimed
    claimed: Mapping<(Address, Address), U256>,
    /// launchpad -> tokens allocated to all participants
    sold: Mapping<Address, U256>,
    /// launchpad -> motes paid and not yet collected by the owner
    raised: Mapping<Address, U512>,
    /// launchpad -> sale tokens ever deposited
    funded: Mapping<Address, U256>,
    /// launchpad -> sale tokens held for it right now
    escrow: Mapping<Address, U256>,
    /// launchpad -> sale tokens paid out to participants
    paid_out: Mapping<Address, U256>,
}

#[odra::module]
impl PurchaseLedger {
    pub fn allocation_of(&self, instance: Address, participant: Address) -> U256 {
        self.allocations.get(&(instance, participant)).unwrap_or_default()
    }

    pub fn claimed_of(&self, instance: Address, participant: Address) -> U256 {
        self.claimed.get(&(instance, participant)).unwrap_or_default()
    }

    pub fn sold(&self, instance: Address) -> U256 {
        self.sold.get(&instance).unwrap_or_default()
    }

    pub fn raised(&self, instance: Address) -> U512 {
        self.raised.get(&instance).unwrap_or_default()
    }

    pub fn funded(&self, instance: Address) -> U256 {
        self.funded.get(&instance).unwrap_or_default()
    }

    pub fn escrow(&self, instance: Address) -> U256 {
        self.escrow.get(&instance).unwrap_or_default()
    }

    pub fn paid_out(&self, instance: Address) -> U256 {
        self.paid_out.get(&instance).unwrap_or_default()
    }

    /// Add a deposit of `amount` sale tokens to a launchpad's escrow.
    ///
    /// Reverts with `FundingExceeded` if total deposits would pass `cap`.
    pub fn record_funding(&mut self, instance: Address, amount: U256, cap: U256) {
        let funded = self
            .funded(instance)
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), LaunchpadError::ArithmeticOverflow);
        if funded > cap {
            self.env().revert(LaunchpadError::FundingExceeded);
        }
        let escrow = self.escrow(instance) + amount;
        self.funded.set(&instance, funded);
        self.escrow.set(&instance, escrow);
    }

    /// Record a purchase of `allocated` tokens for `payment` motes.
    ///
    /// Reverts with `AllocationExceeded` if the launchpad's `cap` would be
    /// oversold.
    pub fn record_purchase(
        &mut self,
        instance: Address,
        participant: Address,
        payment: U512,
        allocated: U256,
        cap: U256,
    ) {
        let sold = self.sold(instance);
        let new_sold = sold
            .checked_add(allocated)
            .unwrap_or_revert_with(&self.env(), LaunchpadError::ArithmeticOverflow);
        if new_sold > cap {
            self.env().revert(LaunchpadError::AllocationExceeded);
        }

        let raised = self.raised(instance);
        let new_raised = raised
            .checked_add(payment)
            .unwrap_or_revert_with(&self.env(), LaunchpadError::ArithmeticOverflow);

        let allocation = self.allocation_of(instance, participant);
        self.allocations
            .set(&(instance, participant), allocation + allocated);
        self.sold.set(&instance, new_sold);
        self.raised.set(&instance, new_raised);
    }

    /// Record a claim and draw it from the launchpad's escrow.
    ///
    /// Reverts with `InsufficientBalance` if the escrow cannot cover it.
    pub fn record_claim(&mut self, instance: Address, participant: Address, amount: U256) {
        let escrow = self.escrow(instance);
        if escrow < amount {
            self.env().revert(LaunchpadError::InsufficientBalance);
        }
        let claimed = self.claimed_of(instance, participant);
        let paid_out = self.paid_out(instance);
        self.claimed.set(&(instance, participant), claimed + amount);
        self.paid_out.set(&instance, paid_out + amount);
        self.escrow.set(&instance, escrow - amount);
    }

    /// Release the escrowed tokens no participant is owed and return the
    /// amount. What was sold but not yet claimed stays in escrow.
    pub fn take_unsold(&mut self, instance: Address) -> U256 {
        let owed = self.sold(instance).saturating_sub(self.paid_out(instance));
        let escrow = self.escrow(instance);
        let unsold = escrow.saturating_sub(owed);
        self.escrow.set(&instance, escrow - unsold);
        unsold
    }

    /// Return and reset the uncollected proceeds of a launchpad
    pub fn take_raised(&mut self, instance: Address) -> U512 {
        let raised = self.raised(instance);
        self.raised.set(&instance, U512::zero());
        raised
    }
}
