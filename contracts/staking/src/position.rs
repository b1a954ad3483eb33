use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{rewards, ContractError};

// ── Storage keys ────────────────────────────────────────────────────────────

/// Per-account positions live in persistent storage under `(POSITION, account)`.
const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

// ── Types ───────────────────────────────────────────────────────────────────

/// One depositor's ledger record.
///
/// A position is opened on the account's first interaction and is never
/// removed; a fully withdrawn account simply sits at zero.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakePosition {
    /// Principal currently earning interest.
    pub staked: i128,
    /// Interest settled but not yet compounded into `staked`.
    pub pending_rewards: i128,
    /// Ledger timestamp of the most recent settlement.
    pub last_settled_at: u64,
}

impl StakePosition {
    pub fn opened_at(now: u64) -> Self {
        Self {
            staked: 0,
            pending_rewards: 0,
            last_settled_at: now,
        }
    }

    /// Credit the interest earned by the currently recorded principal since
    /// the last settlement and move the settlement mark to `now`.
    ///
    /// Returns the amount credited. On error the position is left untouched.
    pub fn settle(&mut self, apy: u32, now: u64) -> Result<i128, ContractError> {
        let earned = rewards::accrue_since(self.staked, apy, self.last_settled_at, now)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let pending = self
            .pending_rewards
            .checked_add(earned)
            .ok_or(ContractError::ArithmeticOverflow)?;

        self.pending_rewards = pending;
        self.last_settled_at = now;
        Ok(earned)
    }

    /// What `pending_rewards` would read if the position were settled at
    /// `now`, without mutating anything.
    pub fn projected_rewards(&self, apy: u32, now: u64) -> Result<i128, ContractError> {
        rewards::accrue_since(self.staked, apy, self.last_settled_at, now)
            .and_then(|earned| self.pending_rewards.checked_add(earned))
            .ok_or(ContractError::ArithmeticOverflow)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(account: &Address) -> (Symbol, Address) {
    (POSITION, account.clone())
}

/// Read the stored position for `account`, if one was ever opened.
pub fn load(env: &Env, account: &Address) -> Option<StakePosition> {
    env.storage().persistent().get(&position_key(account))
}

/// Read the stored position, or a fresh one settled at `now`.
pub fn load_or_open(env: &Env, account: &Address, now: u64) -> StakePosition {
    load(env, account).unwrap_or_else(|| StakePosition::opened_at(now))
}

pub fn store(env: &Env, account: &Address, position: &StakePosition) {
    let key = position_key(account);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
