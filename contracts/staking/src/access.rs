use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

const OWNER: Symbol = symbol_short!("OWNER");

/// Record the ledger owner. Written once by `initialize`; there is no
/// transfer path.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(ContractError::NotInitialized)
}

/// Guard: fail with `Unauthorized` unless `caller` is the recorded owner.
///
/// Only compares identities. Callers are expected to have already demanded
/// `caller.require_auth()` so that the identity is proven.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != owner(env)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
