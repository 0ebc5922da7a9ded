//! LaunchpadFactory - fee-gated registry of launchpads
//!
//! Creating a launchpad costs exactly [`CREATION_FEE`] motes. The fee is
//! credited to the factory's [`FeeLedger`], which only the deployer can
//! withdraw. Every launchpad gets its own derived address, and the factory
//! keeps an append-only record of who created which launchpad for whom.
//!
//! A launchpad sells nothing until `total_amount` sale tokens have been
//! deposited through [`LaunchpadFactory::fund`]. Deposits go into that
//! launchpad's own escrow, and its claims are paid only from it, so
//! launchpads sharing a sale token never touch each other's tokens.
//! Participants buy into a launchpad while its sale is open and claim their
//! allocation linearly over the vesting window.

use odra::prelude::*;
use odra::casper_types::account::AccountHash;
use odra::casper_types::{U256, U512};
use odra::{ContractRef, SubModule};
use crate::errors::LaunchpadError;
use crate::events::{
    FeesWithdrawn, LaunchpadCreated, LaunchpadFunded, ProceedsCollected, TokensClaimed,
    TokensPurchased, UnsoldReclaimed,
};
use crate::token::SaleTokenContractRef;
use super::fee_ledger::FeeLedger;
use super::instance::{Launchpad, LaunchpadPhase};
use super::purchases::PurchaseLedger;

/// Fee for creating a launchpad: 0.01 CSPR in motes
pub const CREATION_FEE: u64 = 10_000_000;

/// Tag mixed into derived launchpad addresses
const INSTANCE_TAG: &[u8; 8] = b"lpad-ins";

/// One creation: who paid, which launchpad was created, and for whom
#[odra::odra_type]
pub struct LaunchpadRecord {
    pub requester: Address,
    pub instance: Address,
    pub beneficiary: Address,
}

#[odra::module(
    events = [
        LaunchpadCreated,
        FeesWithdrawn,
        LaunchpadFunded,
        TokensPurchased,
        TokensClaimed,
        ProceedsCollected,
        UnsoldReclaimed
    ],
    errors = LaunchpadError
)]
pub struct LaunchpadFactory {
    /// Creation fees and owner withdrawal
    fee_ledger: SubModule<FeeLedger>,
    /// Purchases, escrows and claims of every launchpad
    purchases: SubModule<PurchaseLedger>,
    /// Launchpad address -> launchpad
    launchpads: Mapping<Address, Launchpad>,
    /// Creation index -> record
    records: Mapping<u64, LaunchpadRecord>,
    /// Number of launchpads created
    launchpad_count: Var<u64>,
}

#[odra::module]
impl LaunchpadFactory {
    /// Initialize the factory; the deployer becomes its owner
    pub fn init(&mut self) {
        let deployer = self.env().caller();
        self.fee_ledger.init(deployer);
        self.launchpad_count.set(0);
    }

    // ============ View Functions ============

    pub fn owner(&self) -> Address {
        self.fee_ledger.owner()
    }

    /// Fees collected and not yet withdrawn
    pub fn fee_balance(&self) -> U512 {
        self.fee_ledger.balance()
    }

    pub fn required_fee(&self) -> U512 {
        U512::from(CREATION_FEE)
    }

    pub fn launchpad_count(&self) -> u64 {
        self.launchpad_count.get_or_default()
    }

    /// Address of the launchpad created at `index`
    pub fn launchpad_at(&self, index: u64) -> Option<Address> {
        self.records.get(&index).map(|record| record.instance)
    }

    pub fn record_at(&self, index: u64) -> Option<LaunchpadRecord> {
        self.records.get(&index)
    }

    pub fn get_launchpad(&self, instance: Address) -> Option<Launchpad> {
        self.launchpads.get(&instance)
    }

    /// Current phase of a launchpad
    pub fn phase(&self, instance: Address) -> LaunchpadPhase {
        let launchpad = self.launchpad_or_revert(instance);
        launchpad.phase(self.env().get_block_time())
    }

    /// Part of a launchpad's total amount unlocked so far
    pub fn unlocked_amount(&self, instance: Address) -> U256 {
        let launchpad = self.launchpad_or_revert(instance);
        launchpad
            .unlocked(self.env().get_block_time())
            .unwrap_or_revert(&self.env())
    }

    pub fn allocation_of(&self, instance: Address, participant: Address) -> U256 {
        self.purchases.allocation_of(instance, participant)
    }

    pub fn claimed_of(&self, instance: Address, participant: Address) -> U256 {
        self.purchases.claimed_of(instance, participant)
    }

    /// Vested tokens `participant` can claim right now
    pub fn claimable(&self, instance: Address, participant: Address) -> U256 {
        let launchpad = self.launchpad_or_revert(instance);
        self.claimable_now(&launchpad, participant)
    }

    pub fn tokens_sold(&self, instance: Address) -> U256 {
        self.purchases.sold(instance)
    }

    /// Sale proceeds not yet collected by the launchpad owner
    pub fn raised(&self, instance: Address) -> U512 {
        self.purchases.raised(instance)
    }

    /// Sale tokens deposited for a launchpad so far
    pub fn funded(&self, instance: Address) -> U256 {
        self.purchases.funded(instance)
    }

    /// Sale tokens the factory currently holds for a launchpad
    pub fn escrow(&self, instance: Address) -> U256 {
        self.purchases.escrow(instance)
    }

    // ============ Write Functions ============

    /// Create a launchpad owned by `beneficiary`.
    ///
    /// Exactly [`CREATION_FEE`] motes must be attached. Returns the address
    /// of the new launchpad.
    #[odra(payable)]
    pub fn create_launchpad(
        &mut self,
        sale_token: Address,
        beneficiary: Address,
        total_amount: U256,
        sale_start: u64,
        sale_end: u64,
        vesting_start: u64,
        vesting_end: u64,
        ratio: U256,
    ) -> Address {
        let payment = self.env().attached_value();
        let fee = U512::from(CREATION_FEE);
        if payment < fee {
            self.env().revert(LaunchpadError::InsufficientFee);
        }
        if payment > fee {
            self.env().revert(LaunchpadError::ExcessiveFee);
        }

        let requester = self.env().caller();
        let index = self.launchpad_count.get_or_default();
        let now = self.env().get_block_time();
        let instance = self.derive_instance_address(index, now);

        let launchpad = Launchpad {
            address: instance,
            owner: beneficiary,
            creator: requester,
            sale_token,
            beneficiary,
            total_amount,
            sale_start,
            sale_end,
            vesting_start,
            vesting_end,
            ratio,
            created_at: now,
        };
        launchpad.validate().unwrap_or_revert(&self.env());

        self.launchpads.set(&instance, launchpad);
        self.records.set(
            &index,
            LaunchpadRecord {
                requester,
                instance,
                beneficiary,
            },
        );
        self.launchpad_count.set(index + 1);
        self.fee_ledger.credit(payment);

        self.env().emit_event(LaunchpadCreated {
            requester,
            instance,
            beneficiary,
        });

        instance
    }

    /// Top up the fee balance with the attached value
    #[odra(payable)]
    pub fn deposit(&mut self) {
        let amount = self.env().attached_value();
        if amount.is_zero() {
            self.env().revert(LaunchpadError::ZeroAmount);
        }
        self.fee_ledger.credit(amount);
    }

    /// Withdraw all collected fees to the owner. Owner only.
    pub fn withdraw(&mut self) -> U512 {
        self.fee_ledger.withdraw()
    }

    /// Deposit `amount` sale tokens into a launchpad's escrow.
    ///
    /// The caller must have approved the factory for `amount` on the sale
    /// token. Deposits may come in parts but never exceed `total_amount`.
    pub fn fund(&mut self, instance: Address, amount: U256) {
        let launchpad = self.launchpad_or_revert(instance);
        if amount.is_zero() {
            self.env().revert(LaunchpadError::ZeroAmount);
        }

        let funder = self.env().caller();
        self.purchases
            .record_funding(instance, amount, launchpad.total_amount);

        let this = self.env().self_address();
        let mut token = SaleTokenContractRef::new(self.env(), launchpad.sale_token);
        let before = token.balance_of(this);
        if !token.transfer_from(funder, this, amount) {
            self.env().revert(LaunchpadError::TransferFailed);
        }
        let received = token.balance_of(this).saturating_sub(before);
        if received != amount {
            self.env().revert(LaunchpadError::TransferFailed);
        }

        self.env().emit_event(LaunchpadFunded {
            instance,
            funder,
            amount,
        });
    }

    /// Buy into an open sale with the attached value.
    ///
    /// Returns the number of tokens allocated (`payment * ratio`).
    #[odra(payable)]
    pub fn buy(&mut self, instance: Address) -> U256 {
        let launchpad = self.launchpad_or_revert(instance);
        let now = self.env().get_block_time();
        if launchpad.phase(now) != LaunchpadPhase::SaleActive {
            self.env().revert(LaunchpadError::SaleNotActive);
        }
        if self.purchases.funded(instance) < launchpad.total_amount {
            self.env().revert(LaunchpadError::LaunchpadNotFunded);
        }

        let payment = self.env().attached_value();
        if payment.is_zero() {
            self.env().revert(LaunchpadError::ZeroAmount);
        }
        let allocated = launchpad
            .allocation_for(payment)
            .unwrap_or_revert(&self.env());

        let participant = self.env().caller();
        self.purchases.record_purchase(
            instance,
            participant,
            payment,
            allocated,
            launchpad.total_amount,
        );

        self.env().emit_event(TokensPurchased {
            instance,
            participant,
            payment,
            allocated,
        });
        allocated
    }

    /// Claim everything vested for the caller so far. Paid from the
    /// launchpad's escrow only.
    pub fn claim(&mut self, instance: Address) -> U256 {
        let launchpad = self.launchpad_or_revert(instance);
        let participant = self.env().caller();
        let amount = self.claimable_now(&launchpad, participant);
        if amount.is_zero() {
            self.env().revert(LaunchpadError::NothingToClaim);
        }

        self.purchases.record_claim(instance, participant, amount);

        let mut token = SaleTokenContractRef::new(self.env(), launchpad.sale_token);
        if !token.transfer(participant, amount) {
            self.env().revert(LaunchpadError::TransferFailed);
        }

        self.env().emit_event(TokensClaimed {
            instance,
            participant,
            amount,
        });
        amount
    }

    /// Send the sale proceeds of a launchpad to its owner once the sale has
    /// closed. Launchpad owner only.
    pub fn collect_proceeds(&mut self, instance: Address) -> U512 {
        let launchpad = self.launchpad_or_revert(instance);
        let caller = self.env().caller();
        if caller != launchpad.owner {
            self.env().revert(LaunchpadError::Unauthorized);
        }
        if !launchpad.phase(self.env().get_block_time()).is_sale_over() {
            self.env().revert(LaunchpadError::SaleNotEnded);
        }

        let amount = self.purchases.take_raised(instance);
        if amount.is_zero() {
            return amount;
        }
        self.env().transfer_tokens(&launchpad.owner, &amount);

        self.env().emit_event(ProceedsCollected {
            instance,
            owner: launchpad.owner,
            amount,
        });
        amount
    }

    /// Return the escrowed tokens nobody bought to the launchpad owner once
    /// the sale has closed. Launchpad owner only.
    pub fn reclaim_unsold(&mut self, instance: Address) -> U256 {
        let launchpad = self.launchpad_or_revert(instance);
        let caller = self.env().caller();
        if caller != launchpad.owner {
            self.env().revert(LaunchpadError::Unauthorized);
        }
        if !launchpad.phase(self.env().get_block_time()).is_sale_over() {
            self.env().revert(LaunchpadError::SaleNotEnded);
        }

        let amount = self.purchases.take_unsold(instance);
        if amount.is_zero() {
            return amount;
        }
        let mut token = SaleTokenContractRef::new(self.env(), launchpad.sale_token);
        if !token.transfer(launchpad.owner, amount) {
            self.env().revert(LaunchpadError::TransferFailed);
        }

        self.env().emit_event(UnsoldReclaimed {
            instance,
            owner: launchpad.owner,
            amount,
        });
        amount
    }

    // ============ Internal Functions ============

    /// Launchpad address for the `index`-th creation of this factory. The
    /// factory's own address and the index make it unique across factories.
    fn derive_instance_address(&self, index: u64, block_time: u64) -> Address {
        let mut preimage = Vec::new();
        preimage.extend_from_slice(INSTANCE_TAG);
        preimage.extend_from_slice(self.env().self_address().to_string().as_bytes());
        preimage.extend_from_slice(&index.to_le_bytes());
        preimage.extend_from_slice(&block_time.to_le_bytes());
        Address::from(AccountHash::new(self.env().hash(preimage)))
    }

    fn launchpad_or_revert(&self, instance: Address) -> Launchpad {
        self.launchpads
            .get(&instance)
            .unwrap_or_revert_with(&self.env(), LaunchpadError::LaunchpadNotFound)
    }

    fn claimable_now(&self, launchpad: &Launchpad, participant: Address) -> U256 {
        let allocation = self.purchases.allocation_of(launchpad.address, participant);
        let claimed = self.purchases.claimed_of(launchpad.address, participant);
        let vested = launchpad
            .vested(allocation, self.env().get_block_time())
            .unwrap_or_revert(&self.env());
        vested.saturating_sub(claimed)
    }
}
