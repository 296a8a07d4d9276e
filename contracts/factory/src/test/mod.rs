#![cfg(test)]


use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events as _},
    vec, Address, Bytes, BytesN, Env, IntoVal, String,
};

use crate::{
    derivation, events::FactoryEvents, record_pair, storage, Factory, FactoryClient, FactoryError,
};

fn setup_env<'a>() -> (Env, FactoryClient<'a>, Address, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let factory_address = env.register_contract(None, Factory);
    let client = FactoryClient::new(&env, &factory_address);

    let fee_to_setter = Address::generate(&env);
    let pair_wasm_hash = env.deployer().upload_contract_wasm(Bytes::new(&env));
    client.initialize(&fee_to_setter, &pair_wasm_hash);

    let token_a = Address::generate(&env);
    let token_b = Address::generate(&env);

    (env, client, token_a, token_b, fee_to_setter)
}

fn zero_account(env: &Env) -> Address {
    Address::from_string(&String::from_str(
        env,
        "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
    ))
}

fn zero_contract(env: &Env) -> Address {
    Address::from_string(&String::from_str(
        env,
        "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4",
    ))
}

// ---------- initialize ----------

#[test]
fn test_initialize_happy_path() {
    let (_env, client, _, _, fee_to_setter) = setup_env();

    assert!(client.fee_to().is_none());
    assert_eq!(client.fee_to_setter(), Some(fee_to_setter));
    assert!(client.pair_wasm_hash().is_some());
    assert_eq!(client.all_pairs_length(), 0);
    assert!(client.all_pairs(&0).is_none());
}

#[test]
fn test_initialize_double_init_fails() {
    let (env, client, _, _, _) = setup_env();
    let other = Address::generate(&env);
    let hash = BytesN::from_array(&env, &[1u8; 32]);

    assert_eq!(
        client.try_initialize(&other, &hash),
        Err(Ok(FactoryError::AlreadyInitialized))
    );
}

// ---------- create_pair validation ----------

#[test]
fn test_create_pair_identical_assets() {
    let (_env, client, token_a, _, _) = setup_env();
    assert_eq!(
        client.try_create_pair(&token_a, &token_a),
        Err(Ok(FactoryError::IdenticalAssets))
    );
}

#[test]
fn test_create_pair_zero_address() {
    let (env, client, token_a, _, _) = setup_env();

    for zero in [zero_account(&env), zero_contract(&env)] {
        assert_eq!(
            client.try_create_pair(&token_a, &zero),
            Err(Ok(FactoryError::ZeroAddress))
        );
        assert_eq!(
            client.try_create_pair(&zero, &token_a),
            Err(Ok(FactoryError::ZeroAddress))
        );
    }
}

#[test]
fn test_identical_check_precedes_zero_check() {
    let (env, client, _, _, _) = setup_env();
    let zero = zero_account(&env);
    assert_eq!(
        client.try_create_pair(&zero, &zero),
        Err(Ok(FactoryError::IdenticalAssets))
    );
}

#[test]
fn test_create_pair_before_initialize() {
    let env = Env::default();
    let client = FactoryClient::new(&env, &env.register_contract(None, Factory));
    let token_a = Address::generate(&env);
    let token_b = Address::generate(&env);

    assert_eq!(
        client.try_create_pair(&token_a, &token_b),
        Err(Ok(FactoryError::NotInitialized))
    );
    assert_eq!(
        client.try_pair_address(&token_a, &token_b),
        Err(Ok(FactoryError::NotInitialized))
    );
}

#[test]
fn test_create_pair_exists_in_either_order() {
    let (env, client, token_a, token_b, _) = setup_env();
    let existing = Address::generate(&env);

    env.as_contract(&client.address, || {
        let (token_0, token_1) = derivation::sort_tokens(&env, &token_a, &token_b).unwrap();
        storage::set_pair(&env, &token_0, &token_1, &existing);
        storage::set_pair(&env, &token_1, &token_0, &existing);
    });

    assert_eq!(
        client.try_create_pair(&token_a, &token_b),
        Err(Ok(FactoryError::PairExists))
    );
    assert_eq!(
        client.try_create_pair(&token_b, &token_a),
        Err(Ok(FactoryError::PairExists))
    );
    assert_eq!(client.get_pair(&token_a, &token_b), Some(existing.clone()));
    assert_eq!(client.get_pair(&token_b, &token_a), Some(existing));
}

// Deployment needs the compiled pair Wasm (see `e2e`); the bookkeeping that
// follows it runs natively.
#[test]
fn test_record_pair_registers_both_orders_and_appends() {
    let (env, client, token_a, token_b, _) = setup_env();
    let token_c = Address::generate(&env);
    let first = Address::generate(&env);
    let second = Address::generate(&env);

    env.as_contract(&client.address, || {
        let mut factory_storage = storage::get_factory_storage(&env).unwrap();
        record_pair(&env, &mut factory_storage, &token_b, &token_a, &first);
        record_pair(&env, &mut factory_storage, &token_a, &token_c, &second);
    });

    assert_eq!(client.all_pairs_length(), 2);
    assert_eq!(client.all_pairs(&0), Some(first.clone()));
    assert_eq!(client.all_pairs(&1), Some(second.clone()));
    assert!(client.all_pairs(&2).is_none());

    assert_eq!(client.get_pair(&token_a, &token_b), Some(first.clone()));
    assert_eq!(client.get_pair(&token_b, &token_a), Some(first.clone()));
    assert_eq!(client.get_pair(&token_c, &token_a), Some(second.clone()));

    assert_eq!(
        client.try_create_pair(&token_a, &token_b),
        Err(Ok(FactoryError::PairExists))
    );
    assert_eq!(
        client.try_create_pair(&token_c, &token_a),
        Err(Ok(FactoryError::PairExists))
    );
}

#[test]
fn test_record_pair_event_counts_new_pair() {
    let (env, client, token_a, token_b, _) = setup_env();
    let pair = Address::generate(&env);

    env.as_contract(&client.address, || {
        let mut factory_storage = storage::get_factory_storage(&env).unwrap();
        record_pair(&env, &mut factory_storage, &token_b, &token_a, &pair);
    });

    assert_eq!(
        env.events().all(),
        vec![
            &env,
            (
                client.address.clone(),
                (symbol_short!("pair_new"), token_b.clone(), token_a.clone()).into_val(&env),
                (pair.clone(), 1_u32).into_val(&env),
            ),
        ]
    );
}

#[test]
fn test_get_pair_none_for_missing() {
    let (_env, client, token_a, token_b, _) = setup_env();
    assert!(client.get_pair(&token_a, &token_b).is_none());
}

// ---------- address derivation ----------

#[test]
fn test_pair_address_is_order_independent() {
    let (_env, client, token_a, token_b, _) = setup_env();
    assert_eq!(
        client.pair_address(&token_a, &token_b),
        client.pair_address(&token_b, &token_a)
    );
}

#[test]
fn test_pair_address_matches_offline_derivation() {
    let (env, client, token_a, token_b, _) = setup_env();
    let hash = client.pair_wasm_hash().unwrap();

    let (token_0, token_1) = derivation::sort_tokens(&env, &token_a, &token_b).unwrap();
    let offline = derivation::pair_address(&env, &client.address, &token_0, &token_1, &hash);
    assert_eq!(client.pair_address(&token_a, &token_b), offline);
}

#[test]
fn test_pair_address_differs_per_pair_and_factory() {
    let (env, client, token_a, token_b, _) = setup_env();
    let token_c = Address::generate(&env);
    assert_ne!(
        client.pair_address(&token_a, &token_b),
        client.pair_address(&token_a, &token_c)
    );

    let hash = client.pair_wasm_hash().unwrap();
    let other_factory = FactoryClient::new(&env, &env.register_contract(None, Factory));
    other_factory.initialize(&Address::generate(&env), &hash);
    assert_ne!(
        client.pair_address(&token_a, &token_b),
        other_factory.pair_address(&token_a, &token_b)
    );
}

#[test]
fn test_sort_tokens_is_canonical() {
    let env = Env::default();
    let token_a = Address::generate(&env);
    let token_b = Address::generate(&env);

    let forward = derivation::sort_tokens(&env, &token_a, &token_b).unwrap();
    let backward = derivation::sort_tokens(&env, &token_b, &token_a).unwrap();
    assert_eq!(forward, backward);
    assert!(forward.0 < forward.1);
}

// ---------- fee administration ----------

#[test]
fn test_set_fee_to_by_setter() {
    let (env, client, _, _, fee_to_setter) = setup_env();
    let recipient = Address::generate(&env);

    client.set_fee_to(&fee_to_setter, &Some(recipient.clone()));
    assert_eq!(client.fee_to(), Some(recipient));

    client.set_fee_to(&fee_to_setter, &None);
    assert!(client.fee_to().is_none());
}

#[test]
fn test_set_fee_to_forbidden_for_others() {
    let (env, client, _, _, _) = setup_env();
    let intruder = Address::generate(&env);

    assert_eq!(
        client.try_set_fee_to(&intruder, &Some(intruder.clone())),
        Err(Ok(FactoryError::Forbidden))
    );
    assert_eq!(
        client.try_set_fee_to_setter(&intruder, &intruder),
        Err(Ok(FactoryError::Forbidden))
    );
}

#[test]
fn test_fee_to_setter_hand_over() {
    let (env, client, _, _, fee_to_setter) = setup_env();
    let successor = Address::generate(&env);

    client.set_fee_to_setter(&fee_to_setter, &successor);
    assert_eq!(client.fee_to_setter(), Some(successor.clone()));

    assert_eq!(
        client.try_set_fee_to(&fee_to_setter, &None),
        Err(Ok(FactoryError::Forbidden))
    );
    client.set_fee_to(&successor, &Some(successor.clone()));
    assert_eq!(client.fee_to(), Some(successor));
}

#[test]
#[should_panic]
fn test_set_fee_to_requires_caller_auth() {
    let env = Env::default();
    let client = FactoryClient::new(&env, &env.register_contract(None, Factory));
    let fee_to_setter = Address::generate(&env);
    client.initialize(&fee_to_setter, &BytesN::from_array(&env, &[0u8; 32]));

    // No auths mocked.
    client.set_fee_to(&fee_to_setter, &None);
}

// ---------- events ----------

#[test]
fn test_pair_created_event_uses_caller_order() {
    let (env, client, token_a, token_b, _) = setup_env();
    let pair = Address::generate(&env);

    env.as_contract(&client.address, || {
        FactoryEvents::pair_created(&env, &token_b, &token_a, &pair, 1);
    });

    assert_eq!(
        env.events().all(),
        vec![
            &env,
            (
                client.address.clone(),
                (symbol_short!("pair_new"), token_b.clone(), token_a.clone()).into_val(&env),
                (pair.clone(), 1_u32).into_val(&env),
            ),
        ]
    );
}
