//! FeeLedger - accumulated creation fees and owner-only withdrawal

use odra::prelude::*;
use odra::casper_types::U512;
use crate::errors::LaunchpadError;
use crate::events::FeesWithdrawn;

/// Tracks the fees a factory has collected. Only fees are tracked here,
/// other value held by the factory (sale proceeds) is accounted elsewhere.
#[odra::module(events = [FeesWithdrawn], errors = LaunchpadError)]
pub struct FeeLedger {
    /// Account allowed to withdraw, fixed at init
    owner: Var<Address>,
    /// Fees collected minus fees withdrawn, in motes
    balance: Var<U512>,
}

#[odra::module]
impl FeeLedger {
    pub fn init(&mut self, owner: Address) {
        self.owner.set(owner);
        self.balance.set(U512::zero());
    }

    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(LaunchpadError::Unauthorized)
    }

    pub fn balance(&self) -> U512 {
        self.balance.get_or_default()
    }

    /// Record `amount` motes received by the contract
    pub fn credit(&mut self, amount: U512) {
        let current = self.balance.get_or_default();
        let updated = current
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), LaunchpadError::ArithmeticOverflow);
        self.balance.set(updated);
    }

    /// Send the whole balance to the owner.
    ///
    /// The balance is zeroed before the transfer is made. With nothing to
    /// withdraw this is a no-op returning zero.
    pub fn withdraw(&mut self) -> U512 {
        let caller = self.env().caller();
        let owner = self.owner();
        if caller != owner {
            self.env().revert(LaunchpadError::Unauthorized);
        }

        let amount = self.balance.get_or_default();
        if amount.is_zero() {
            return U512::zero();
        }

        self.balance.set(U512::zero());
        self.env().transfer_tokens(&owner, &amount);

        self.env().emit_event(FeesWithdrawn { owner, amount });
        amount
    }
}
