#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub apy: u32,
    pub timestamp: u64,
}

/// Fired when a depositor moves tokens into custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a depositor takes principal back out of custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when settled rewards are compounded into principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

/// Fired when the owner changes the APY.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApySetEvent {
    pub owner: Address,
    pub old_apy: u32,
    pub new_apy: u32,
    pub timestamp: u64,
}

/// Fired when tokens are added to custody to back compounded rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address, apy: u32) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            apy,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    amount: i128,
    new_balance: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_balance,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    amount: i128,
    new_balance: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            new_balance,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, staker: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_apy_set(env: &Env, owner: Address, old_apy: u32, new_apy: u32) {
    env.events().publish(
        (symbol_short!("APY_SET"),),
        ApySetEvent {
            owner,
            old_apy,
            new_apy,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, funder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        RewardsFundedEvent {
            funder,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
