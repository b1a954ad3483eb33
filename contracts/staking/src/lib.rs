#![no_std]

pub mod access;
pub mod events;
pub mod position;
pub mod rewards;

use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Symbol};

pub use position::StakePosition;
use rewards::DEFAULT_APY;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const APY: Symbol = symbol_short!("APY");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

const INSTANCE_TTL_THRESHOLD: u32 = 17_280;
const INSTANCE_TTL_EXTEND_TO: u32 = 518_400;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    TransferFailed = 6,
    ArithmeticOverflow = 7,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `owner` – the only identity allowed to change the APY, fixed forever.
    /// * `token` – SEP-41 token contract whose balances are staked.
    ///
    /// The APY starts at `DEFAULT_APY` (1 %).
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&APY, &DEFAULT_APY);
        env.storage().instance().set(&TOTAL_STAKED, &0i128);
        access::set_owner(&env, &owner);
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, owner, token, DEFAULT_APY);

        Ok(())
    }

    // ── Owner configuration ─────────────────────────────────────────────────

    /// Replace the global APY. Owner only.
    ///
    /// No position is settled here: whatever interval is still open on an
    /// account is settled later at the rate in force at that moment.
    pub fn set_apy(env: Env, caller: Address, new_apy: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        let old_apy = Self::current_apy(&env);
        env.storage().instance().set(&APY, &new_apy);
        Self::extend_instance_ttl(&env);

        events::publish_apy_set(&env, caller, old_apy, new_apy);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens.
    ///
    /// The staker must have approved this contract as spender beforehand;
    /// the tokens are pulled with `transfer_from`. Interest on the existing
    /// principal is settled before the deposit is credited.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let mut position = position::load_or_open(&env, &staker, now);

        // 1. Settle the interval on the principal as it stood.
        position.settle(Self::current_apy(&env), now)?;

        // 2. Credit the deposit.
        position.staked = position
            .staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let new_total = Self::total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // 3. Pull the tokens; nothing has been written yet if this fails.
        Self::pull_into_custody(&env, &staker, amount)?;

        position::store(&env, &staker, &position);
        Self::set_total_staked(&env, new_total);

        events::publish_staked(&env, staker, amount, position.staked, new_total);

        Ok(())
    }

    /// Return `amount` of principal to the staker.
    ///
    /// The balance is reduced *before* settlement, so the interval since the
    /// last settlement accrues on the remaining principal only. The withdrawn
    /// portion earns nothing for that interval.
    pub fn withdrawing(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let mut position = position::load_or_open(&env, &staker, now);
        if amount > position.staked {
            return Err(ContractError::InsufficientBalance);
        }

        // 1. Reduce principal and the global total.
        position.staked = position
            .staked
            .checked_sub(amount)
            .ok_or(ContractError::InsufficientBalance)?;
        let new_total = Self::total_staked(&env)
            .checked_sub(amount)
            .ok_or(ContractError::InsufficientBalance)?;

        // 2. Settle on the reduced principal.
        position.settle(Self::current_apy(&env), now)?;

        // 3. Release the tokens.
        Self::release_from_custody(&env, &staker, amount)?;

        position::store(&env, &staker, &position);
        Self::set_total_staked(&env, new_total);

        events::publish_withdrawn(&env, staker, amount, position.staked, new_total);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Settle and compound all pending rewards into the staked balance.
    ///
    /// Returns the amount compounded. A claim with nothing pending still
    /// succeeds and only refreshes the settlement timestamp.
    pub fn claiming_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let now = env.ledger().timestamp();
        let mut position = position::load_or_open(&env, &staker, now);

        position.settle(Self::current_apy(&env), now)?;

        let reward = position.pending_rewards;
        position.pending_rewards = 0;
        position.staked = position
            .staked
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let new_total = Self::total_staked(&env)
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;

        position::store(&env, &staker, &position);
        Self::set_total_staked(&env, new_total);

        events::publish_rewards_claimed(&env, staker, reward, position.staked);

        Ok(reward)
    }

    /// Move `amount` tokens from `funder` into custody without crediting any
    /// position. Compounded rewards are ledger entries only; this is how the
    /// tokens backing them reach the contract.
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let token_id = Self::token_address(&env)?;
        let custody = env.current_contract_address();
        let result =
            token::Client::new(&env, &token_id).try_transfer(&funder, &custody, &amount);
        if !matches!(result, Ok(Ok(()))) {
            log!(&env, "reward funding rejected by token", funder, amount);
            return Err(ContractError::TransferFailed);
        }

        events::publish_rewards_funded(&env, funder, amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Staked principal as of the last settlement.
    pub fn get_user_balance(env: Env, account: Address) -> i128 {
        position::load(&env, &account).map_or(0, |p| p.staked)
    }

    /// Pending rewards as of the last settlement. Does not settle; see
    /// `preview_rewards` for an as-of-now figure.
    pub fn get_user_rewards(env: Env, account: Address) -> i128 {
        position::load(&env, &account).map_or(0, |p| p.pending_rewards)
    }

    /// Pending rewards projected to the current ledger time, without writing.
    pub fn preview_rewards(env: Env, account: Address) -> Result<i128, ContractError> {
        match position::load(&env, &account) {
            Some(position) => {
                position.projected_rewards(Self::current_apy(&env), env.ledger().timestamp())
            }
            None => Ok(0),
        }
    }

    /// The full stored record. Accounts that never interacted read as zero.
    pub fn get_position(env: Env, account: Address) -> StakePosition {
        position::load(&env, &account).unwrap_or_default()
    }

    pub fn apy(env: Env) -> u32 {
        Self::current_apy(&env)
    }

    /// Sum of all staked principal.
    pub fn total_staked_balance(env: Env) -> i128 {
        Self::total_staked(&env)
    }

    /// Tokens actually held by the contract on the token ledger.
    pub fn custody_balance(env: Env) -> Result<i128, ContractError> {
        let token_id = Self::token_address(&env)?;
        Ok(token::Client::new(&env, &token_id).balance(&env.current_contract_address()))
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        access::owner(&env)
    }

    pub fn token(env: Env) -> Result<Address, ContractError> {
        Self::token_address(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn current_apy(env: &Env) -> u32 {
        env.storage().instance().get(&APY).unwrap_or(DEFAULT_APY)
    }

    fn total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    fn set_total_staked(env: &Env, total: i128) {
        env.storage().instance().set(&TOTAL_STAKED, &total);
        Self::extend_instance_ttl(env);
    }

    fn token_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }

    /// Pull `amount` from `from` into custody against the allowance `from`
    /// granted this contract.
    fn pull_into_custody(env: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
        let token_id = Self::token_address(env)?;
        let custody = env.current_contract_address();
        let result = token::Client::new(env, &token_id).try_transfer_from(
            &custody, from, &custody, &amount,
        );
        if !matches!(result, Ok(Ok(()))) {
            log!(
                env,
                "stake transfer rejected by token",
                from.clone(),
                amount
            );
            return Err(ContractError::TransferFailed);
        }
        Ok(())
    }

    fn release_from_custody(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        let token_id = Self::token_address(env)?;
        let custody = env.current_contract_address();
        let result = token::Client::new(env, &token_id).try_transfer(&custody, to, &amount);
        if !matches!(result, Ok(Ok(()))) {
            log!(
                env,
                "withdrawal transfer rejected by token",
                to.clone(),
                amount
            );
            return Err(ContractError::TransferFailed);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_access;
