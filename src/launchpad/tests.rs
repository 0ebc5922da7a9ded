//! Lifecycle tests: creation, funding, sale, proceeds, vesting claims and fee
//! withdrawal

use odra::prelude::*;
use odra::casper_types::{U256, U512};
use odra::host::{Deployer, HostEnv, NoArgs};

use crate::errors::LaunchpadError;
use crate::events::{
    LaunchpadFunded, ProceedsCollected, TokensClaimed, TokensPurchased, UnsoldReclaimed,
};
use crate::launchpad::{LaunchpadFactory, LaunchpadFactoryHostRef, LaunchpadPhase, CREATION_FEE};
use crate::token::{TestToken, TestTokenHostRef, TestTokenInitArgs};

const TOTAL: u64 = 10_000;
const RATIO: u64 = 100;
const SALE_OFFSET: u64 = 100;
const SALE_LENGTH: u64 = 900;
const VESTING_LENGTH: u64 = 1_000;

struct Fixture {
    env: HostEnv,
    factory: LaunchpadFactoryHostRef,
    token: TestTokenHostRef,
    instance: Address,
    sale_start: u64,
    sale_end: u64,
    deployer: Address,
    beneficiary: Address,
    alice: Address,
    bob: Address,
}

fn fee() -> U512 {
    U512::from(CREATION_FEE)
}

/// Factory and token deployed by account 0, a launchpad for account 1 funded
/// by account 0
/// whose sale opens `SALE_OFFSET` after deployment and whose vesting starts
/// as soon as the sale closes.
fn setup() -> Fixture {
    let env = odra_test::env();
    let deployer = env.get_account(0);
    let beneficiary = env.get_account(1);
    let alice = env.get_account(2);
    let bob = env.get_account(3);

    env.set_caller(deployer);
    let mut factory = LaunchpadFactory::deploy(&env, NoArgs);
    let mut token = TestToken::deploy(
        &env,
        TestTokenInitArgs {
            name: String::from("Test Token"),
            symbol: String::from("TST"),
            initial_supply: U256::from(1_000_000u64),
        },
    );

    let now = env.block_time();
    let sale_start = now + SALE_OFFSET;
    let sale_end = sale_start + SALE_LENGTH;
    let instance = factory.with_tokens(fee()).create_launchpad(
        token.address().clone(),
        beneficiary,
        U256::from(TOTAL),
        sale_start,
        sale_end,
        sale_end,
        sale_end + VESTING_LENGTH,
        U256::from(RATIO),
    );

    token.approve(factory.address().clone(), U256::from(TOTAL));
    factory.fund(instance, U256::from(TOTAL));

    Fixture {
        env,
        factory,
        token,
        instance,
        sale_start,
        sale_end,
        deployer,
        beneficiary,
        alice,
        bob,
    }
}

/// A second launchpad on the fixture's token, with the same windows and
/// ratio. Left unfunded.
fn create_second(f: &Fixture, creator: Address, owner: Address, total: u64) -> Address {
    f.env.set_caller(creator);
    f.factory.with_tokens(fee()).create_launchpad(
        f.token.address().clone(),
        owner,
        U256::from(total),
        f.sale_start,
        f.sale_end,
        f.sale_end,
        f.sale_end + VESTING_LENGTH,
        U256::from(RATIO),
    )
}

#[test]
fn test_funding_moves_tokens_into_escrow() {
    let f = setup();
    let total = U256::from(TOTAL);

    assert_eq!(f.factory.funded(f.instance), total);
    assert_eq!(f.factory.escrow(f.instance), total);
    assert_eq!(f.token.balance_of(f.factory.address().clone()), total);
    assert_eq!(f.token.allowance(f.deployer, f.factory.address().clone()), U256::zero());
    assert!(f.env.emitted_event(
        &f.factory,
        LaunchpadFunded {
            instance: f.instance,
            funder: f.deployer,
            amount: total,
        }
    ));
}

#[test]
fn test_fund_rejects_zero_and_excess() {
    let mut f = setup();
    f.token.approve(f.factory.address().clone(), U256::one());

    assert_eq!(
        f.factory.try_fund(f.instance, U256::zero()),
        Err(LaunchpadError::ZeroAmount.into())
    );
    assert_eq!(
        f.factory.try_fund(f.instance, U256::one()),
        Err(LaunchpadError::FundingExceeded.into())
    );
    assert_eq!(f.factory.funded(f.instance), U256::from(TOTAL));
    assert_eq!(f.token.balance_of(f.factory.address().clone()), U256::from(TOTAL));
}

#[test]
fn test_buy_from_unfunded_launchpad_fails() {
    let mut f = setup();
    let second = create_second(&f, f.deployer, f.beneficiary, TOTAL);

    // Partly funded is still not funded
    f.token.approve(f.factory.address().clone(), U256::from(TOTAL));
    f.factory.fund(second, U256::from(TOTAL / 2));

    f.env.advance_block_time(SALE_OFFSET);
    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.with_tokens(U512::from(10u64)).try_buy(second),
        Err(LaunchpadError::LaunchpadNotFunded.into())
    );
    assert_eq!(f.factory.tokens_sold(second), U256::zero());

    f.env.set_caller(f.deployer);
    f.factory.fund(second, U256::from(TOTAL / 2));

    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.with_tokens(U512::from(10u64)).buy(second),
        U256::from(1_000u64)
    );
}

#[test]
fn test_unfunded_launchpad_cannot_drain_shared_token() {
    let mut f = setup();
    let mallory = f.env.get_account(5);
    let decoy = create_second(&f, mallory, mallory, TOTAL);

    f.env.advance_block_time(SALE_OFFSET);
    f.env.set_caller(f.alice);
    f.factory.with_tokens(U512::from(100u64)).buy(f.instance);

    // Mallory holds no tokens to fund the decoy, so it never sells
    f.env.set_caller(mallory);
    f.token.approve(f.factory.address().clone(), U256::from(TOTAL));
    assert!(f.factory.try_fund(decoy, U256::from(TOTAL)).is_err());
    assert_eq!(
        f.factory.with_tokens(U512::from(100u64)).try_buy(decoy),
        Err(LaunchpadError::LaunchpadNotFunded.into())
    );

    f.env.advance_block_time(SALE_LENGTH + VESTING_LENGTH);
    assert_eq!(
        f.factory.try_claim(decoy),
        Err(LaunchpadError::NothingToClaim.into())
    );
    assert_eq!(f.token.balance_of(mallory), U256::zero());

    // The funded launchpad still pays in full
    f.env.set_caller(f.alice);
    assert_eq!(f.factory.claim(f.instance), U256::from(TOTAL));
    assert_eq!(f.factory.escrow(f.instance), U256::zero());
}

#[test]
fn test_two_launchpads_on_one_token_stay_isolated() {
    let mut f = setup();
    let carol = f.env.get_account(4);
    let second = create_second(&f, f.deployer, carol, 5_000);
    f.token.approve(f.factory.address().clone(), U256::from(5_000u64));
    f.factory.fund(second, U256::from(5_000u64));

    f.env.advance_block_time(SALE_OFFSET);
    f.env.set_caller(f.alice);
    f.factory.with_tokens(U512::from(40u64)).buy(f.instance);
    f.env.set_caller(f.bob);
    f.factory.with_tokens(U512::from(30u64)).buy(second);

    assert_eq!(f.factory.tokens_sold(f.instance), U256::from(4_000u64));
    assert_eq!(f.factory.tokens_sold(second), U256::from(3_000u64));
    assert_eq!(f.factory.raised(f.instance), U512::from(40u64));
    assert_eq!(f.factory.raised(second), U512::from(30u64));

    // Each owner collects only their own proceeds
    f.env.advance_block_time(SALE_LENGTH);
    f.env.set_caller(carol);
    assert_eq!(
        f.factory.try_collect_proceeds(f.instance),
        Err(LaunchpadError::Unauthorized.into())
    );
    assert_eq!(f.factory.collect_proceeds(second), U512::from(30u64));
    f.env.set_caller(f.beneficiary);
    assert_eq!(f.factory.collect_proceeds(f.instance), U512::from(40u64));

    // Each participant claims only from the launchpad they bought into
    f.env.advance_block_time(VESTING_LENGTH);
    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.try_claim(second),
        Err(LaunchpadError::NothingToClaim.into())
    );
    assert_eq!(f.factory.claim(f.instance), U256::from(4_000u64));
    f.env.set_caller(f.bob);
    assert_eq!(f.factory.claim(second), U256::from(3_000u64));

    assert_eq!(f.factory.escrow(f.instance), U256::from(6_000u64));
    assert_eq!(f.factory.escrow(second), U256::from(2_000u64));

    // Unsold tokens go back to the right owner
    f.env.set_caller(carol);
    assert_eq!(f.factory.reclaim_unsold(second), U256::from(2_000u64));
    f.env.set_caller(f.beneficiary);
    assert_eq!(f.factory.reclaim_unsold(f.instance), U256::from(6_000u64));

    assert_eq!(f.token.balance_of(carol), U256::from(2_000u64));
    assert_eq!(f.token.balance_of(f.beneficiary), U256::from(6_000u64));
    assert_eq!(f.token.balance_of(f.factory.address().clone()), U256::zero());
}

#[test]
fn test_reclaim_unsold() {
    let mut f = setup();
    f.env.advance_block_time(SALE_OFFSET);
    f.env.set_caller(f.alice);
    f.factory.with_tokens(U512::from(25u64)).buy(f.instance);

    f.env.set_caller(f.beneficiary);
    assert_eq!(
        f.factory.try_reclaim_unsold(f.instance),
        Err(LaunchpadError::SaleNotEnded.into())
    );

    f.env.advance_block_time(SALE_LENGTH);
    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.try_reclaim_unsold(f.instance),
        Err(LaunchpadError::Unauthorized.into())
    );

    f.env.set_caller(f.beneficiary);
    assert_eq!(f.factory.reclaim_unsold(f.instance), U256::from(7_500u64));
    assert!(f.env.emitted_event(
        &f.factory,
        UnsoldReclaimed {
            instance: f.instance,
            owner: f.beneficiary,
            amount: U256::from(7_500u64),
        }
    ));
    assert_eq!(f.factory.reclaim_unsold(f.instance), U256::zero());

    // Alice's allocation is still covered
    f.env.advance_block_time(VESTING_LENGTH);
    f.env.set_caller(f.alice);
    assert_eq!(f.factory.claim(f.instance), U256::from(2_500u64));
    assert_eq!(f.token.balance_of(f.factory.address().clone()), U256::zero());
}

#[test]
fn test_buy_before_sale_opens_fails() {
    let f = setup();
    assert_eq!(f.factory.phase(f.instance), LaunchpadPhase::Scheduled);

    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.with_tokens(U512::from(10u64)).try_buy(f.instance),
        Err(LaunchpadError::SaleNotActive.into())
    );
    assert_eq!(f.factory.tokens_sold(f.instance), U256::zero());
}

#[test]
fn test_buy_allocates_by_ratio() {
    let f = setup();
    f.env.advance_block_time(SALE_OFFSET);
    assert_eq!(f.factory.phase(f.instance), LaunchpadPhase::SaleActive);

    f.env.set_caller(f.alice);
    let allocated = f.factory.with_tokens(U512::from(40u64)).buy(f.instance);

    assert_eq!(allocated, U256::from(4_000u64));
    assert_eq!(f.factory.allocation_of(f.instance, f.alice), U256::from(4_000u64));
    assert_eq!(f.factory.tokens_sold(f.instance), U256::from(4_000u64));
    assert_eq!(f.factory.raised(f.instance), U512::from(40u64));
    assert!(f.env.emitted_event(
        &f.factory,
        TokensPurchased {
            instance: f.instance,
            participant: f.alice,
            payment: U512::from(40u64),
            allocated: U256::from(4_000u64),
        }
    ));

    // Sale proceeds are not creation fees
    assert_eq!(f.factory.fee_balance(), fee());
}

#[test]
fn test_buy_rejects_zero_payment_and_oversell() {
    let mut f = setup();
    f.env.advance_block_time(SALE_OFFSET);

    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.try_buy(f.instance),
        Err(LaunchpadError::ZeroAmount.into())
    );

    f.factory.with_tokens(U512::from(100u64)).buy(f.instance);

    f.env.set_caller(f.bob);
    assert_eq!(
        f.factory.with_tokens(U512::from(1u64)).try_buy(f.instance),
        Err(LaunchpadError::AllocationExceeded.into())
    );
    assert_eq!(f.factory.allocation_of(f.instance, f.bob), U256::zero());
    assert_eq!(f.factory.raised(f.instance), U512::from(100u64));
}

#[test]
fn test_buy_after_sale_closes_fails() {
    let f = setup();
    f.env.advance_block_time(SALE_OFFSET + SALE_LENGTH);

    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.with_tokens(U512::from(10u64)).try_buy(f.instance),
        Err(LaunchpadError::SaleNotActive.into())
    );
}

#[test]
fn test_collect_proceeds() {
    let mut f = setup();
    f.env.advance_block_time(SALE_OFFSET);
    f.env.set_caller(f.alice);
    f.factory.with_tokens(U512::from(40u64)).buy(f.instance);
    f.env.set_caller(f.bob);
    f.factory.with_tokens(U512::from(60u64)).buy(f.instance);

    f.env.set_caller(f.beneficiary);
    assert_eq!(
        f.factory.try_collect_proceeds(f.instance),
        Err(LaunchpadError::SaleNotEnded.into())
    );

    f.env.advance_block_time(SALE_LENGTH);

    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.try_collect_proceeds(f.instance),
        Err(LaunchpadError::Unauthorized.into())
    );

    f.env.set_caller(f.beneficiary);
    let before = f.env.balance_of(&f.beneficiary);
    assert_eq!(f.factory.collect_proceeds(f.instance), U512::from(100u64));
    assert_eq!(f.env.balance_of(&f.beneficiary), before + U512::from(100u64));
    assert!(f.env.emitted_event(
        &f.factory,
        ProceedsCollected {
            instance: f.instance,
            owner: f.beneficiary,
            amount: U512::from(100u64),
        }
    ));

    assert_eq!(f.factory.collect_proceeds(f.instance), U512::zero());
    assert_eq!(f.factory.fee_balance(), fee());
}

#[test]
fn test_vesting_claims() {
    let mut f = setup();
    f.env.advance_block_time(SALE_OFFSET);
    f.env.set_caller(f.alice);
    f.factory.with_tokens(U512::from(40u64)).buy(f.instance);
    f.env.set_caller(f.bob);
    f.factory.with_tokens(U512::from(60u64)).buy(f.instance);

    // Nothing vests while the sale is open
    f.env.set_caller(f.alice);
    assert_eq!(
        f.factory.try_claim(f.instance),
        Err(LaunchpadError::NothingToClaim.into())
    );

    // Halfway through vesting
    f.env.advance_block_time(SALE_LENGTH + VESTING_LENGTH / 2);
    assert_eq!(f.factory.phase(f.instance), LaunchpadPhase::VestingActive);
    assert_eq!(f.factory.unlocked_amount(f.instance), U256::from(TOTAL / 2));
    assert_eq!(f.factory.claimable(f.instance, f.alice), U256::from(2_000u64));

    assert_eq!(f.factory.claim(f.instance), U256::from(2_000u64));
    assert_eq!(f.token.balance_of(f.alice), U256::from(2_000u64));
    assert_eq!(f.factory.claimed_of(f.instance, f.alice), U256::from(2_000u64));
    assert!(f.env.emitted_event(
        &f.factory,
        TokensClaimed {
            instance: f.instance,
            participant: f.alice,
            amount: U256::from(2_000u64),
        }
    ));
    assert_eq!(
        f.factory.try_claim(f.instance),
        Err(LaunchpadError::NothingToClaim.into())
    );

    // Past the end everything is claimable
    f.env.advance_block_time(VESTING_LENGTH);
    assert_eq!(f.factory.phase(f.instance), LaunchpadPhase::FullyVested);
    assert_eq!(f.factory.unlocked_amount(f.instance), U256::from(TOTAL));

    assert_eq!(f.factory.claim(f.instance), U256::from(2_000u64));
    f.env.set_caller(f.bob);
    assert_eq!(f.factory.claim(f.instance), U256::from(6_000u64));

    assert_eq!(f.token.balance_of(f.alice), U256::from(4_000u64));
    assert_eq!(f.token.balance_of(f.bob), U256::from(6_000u64));
    assert_eq!(f.token.balance_of(f.factory.address().clone()), U256::zero());
}

#[test]
fn test_withdraw_only_takes_fees() {
    let mut f = setup();
    f.env.advance_block_time(SALE_OFFSET);
    f.env.set_caller(f.alice);
    f.factory.with_tokens(U512::from(50u64)).buy(f.instance);

    f.env.set_caller(f.deployer);
    let before = f.env.balance_of(&f.deployer);
    assert_eq!(f.factory.withdraw(), fee());
    assert!(f.env.balance_of(&f.deployer) > before);
    assert_eq!(f.factory.fee_balance(), U512::zero());

    // Proceeds stay with the launchpad
    assert_eq!(f.factory.raised(f.instance), U512::from(50u64));
    assert_eq!(f.env.balance_of(&f.factory.address().clone()), U512::from(50u64));
}
