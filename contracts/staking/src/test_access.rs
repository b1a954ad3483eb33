extern crate std;

use soroban_sdk::{
    testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation},
    Address, Env, IntoVal, Symbol,
};

use crate::{ContractError, StakingContract, StakingContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token.address());

    (env, client, owner)
}

// ── Owner guard ──────────────────────────────────────────────────────────────

#[test]
fn test_owner_sets_apy() {
    let (_env, client, owner) = setup();

    client.set_apy(&owner, &12);
    assert_eq!(client.apy(), 12);
}

#[test]
fn test_owner_may_set_zero_apy() {
    let (_env, client, owner) = setup();

    client.set_apy(&owner, &0);
    assert_eq!(client.apy(), 0);
}

#[test]
fn test_non_owner_cannot_set_apy() {
    let (env, client, owner) = setup();
    client.set_apy(&owner, &7);

    let intruder = Address::generate(&env);
    match client.try_set_apy(&intruder, &999) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.apy(), 7);
}

#[test]
fn test_owner_is_fixed_at_initialize() {
    let (env, client, owner) = setup();

    let usurper = Address::generate(&env);
    let token = Address::generate(&env);
    assert!(client.try_initialize(&usurper, &token).is_err());
    assert_eq!(client.owner(), owner);
}

#[test]
fn test_set_apy_requires_owner_signature() {
    let (env, client, owner) = setup();

    client.set_apy(&owner, &3);

    assert_eq!(
        env.auths(),
        std::vec![(
            owner.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    client.address.clone(),
                    Symbol::new(&env, "set_apy"),
                    (owner.clone(), 3u32).into_val(&env),
                )),
                sub_invocations: std::vec![],
            }
        )]
    );
}

#[test]
fn test_set_apy_without_signature_is_rejected() {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    client.initialize(&owner, &token.address());

    // Drop the blanket mock: the owner has signed nothing for this call.
    env.set_auths(&[]);
    assert!(client.try_set_apy(&owner, &50).is_err());
    assert_eq!(client.apy(), 1);
}
