//! TestToken - minimal CEP-18 style token
//!
//! Used as the sale token of a launchpad. The whole initial supply is minted
//! to the deployer, who then funds launchpads by transferring tokens to the
//! factory.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::LaunchpadError;
use crate::events::{Approval, Transfer};

/// TestToken module
#[odra::module(events = [Transfer, Approval], errors = LaunchpadError)]
pub struct TestToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl TestToken {
    /// Initialize the token and mint `initial_supply` to the deployer
    pub fn init(&mut self, name: String, symbol: String, initial_supply: U256) {
        let deployer = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(18);
        self.total_supply.set(initial_supply);
        self.balances.set(&deployer, initial_supply);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to: deployer,
            value: initial_supply,
        });
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.allowances.set(&(caller, spender), amount);
        self.env().emit_event(Approval {
            owner: caller,
            spender,
            value: amount,
        });
        true
    }

    /// Transfer tokens on behalf of `from` (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);
        if current_allowance < amount {
            self.env().revert(LaunchpadError::InsufficientBalance);
        }

        self.allowances.set(&(from, caller), current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(LaunchpadError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }
}

/// External interface of a sale token. Launchpads pull deposits with
/// `transfer_from`, check what arrived with `balance_of` and pay claims with
/// `transfer`.
#[odra::external_contract]
pub trait SaleToken {
    fn balance_of(&self, owner: Address) -> U256;
    fn transfer(&mut self, to: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;
}
