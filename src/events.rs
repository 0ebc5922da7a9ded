//! Events emitted by the launchpad contracts

use odra::prelude::*;
use odra::casper_types::{U256, U512};

/// Emitted once per successful launchpad creation
#[odra::event]
pub struct LaunchpadCreated {
    pub requester: Address,
    pub instance: Address,
    pub beneficiary: Address,
}

/// Emitted when the factory owner withdraws accumulated fees
#[odra::event]
pub struct FeesWithdrawn {
    pub owner: Address,
    pub amount: U512,
}

/// Emitted when sale tokens are deposited into a launchpad's escrow
#[odra::event]
pub struct LaunchpadFunded {
    pub instance: Address,
    pub funder: Address,
    pub amount: U256,
}

/// Emitted when a launchpad owner takes back tokens nobody bought
#[odra::event]
pub struct UnsoldReclaimed {
    pub instance: Address,
    pub owner: Address,
    pub amount: U256,
}

/// Emitted when a participant buys into an open sale
#[odra::event]
pub struct TokensPurchased {
    pub instance: Address,
    pub participant: Address,
    pub payment: U512,
    pub allocated: U256,
}

/// Emitted when a participant claims vested tokens
#[odra::event]
pub struct TokensClaimed {
    pub instance: Address,
    pub participant: Address,
    pub amount: U256,
}

/// Emitted when a launchpad owner collects sale proceeds
#[odra::event]
pub struct ProceedsCollected {
    pub instance: Address,
    pub owner: Address,
    pub amount: U512,
}

/// CEP-18 transfer
#[odra::event]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

/// CEP-18 approval
#[odra::event]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
}
