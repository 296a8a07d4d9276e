#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate std;

mod derivation;
mod errors;
mod events;
mod storage;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractclient, contractimpl, Address, BytesN, Env};

pub use errors::FactoryError;
use events::FactoryEvents;
use storage::FactoryStorage;

#[contractclient(name = "PairClient")]
pub trait PairInterface {
    fn initialize(env: Env, factory: Address, token_a: Address, token_b: Address);
}

#[contract]
pub struct Factory;

/// Stores a freshly deployed pair under both asset orderings, appends it to
/// the creation list and emits `pair_new` with the caller's asset order.
fn record_pair(
    env: &Env,
    factory_storage: &mut FactoryStorage,
    token_a: &Address,
    token_b: &Address,
    pair: &Address,
) {
    storage::set_pair(env, token_a, token_b, pair);
    storage::set_pair(env, token_b, token_a, pair);
    storage::set_pair_at(env, factory_storage.pair_count, pair);

    factory_storage.pair_count += 1;
    storage::set_factory_storage(env, factory_storage);
    storage::extend_instance_ttl(env);

    FactoryEvents::pair_created(env, token_a, token_b, pair, factory_storage.pair_count);
}

#[contractimpl]
impl Factory {
    pub fn initialize(
        env: Env,
        fee_to_setter: Address,
        pair_wasm_hash: BytesN<32>,
    ) -> Result<(), FactoryError> {
        if storage::has_factory_storage(&env) {
            return Err(FactoryError::AlreadyInitialized);
        }

        let factory_storage = FactoryStorage {
            pair_wasm_hash,
            pair_count: 0,
            fee_to: None,
            fee_to_setter,
        };

        storage::set_factory_storage(&env, &factory_storage);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Deploys the single pair for the unordered asset pair `{token_a, token_b}`.
    pub fn create_pair(
        env: Env,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, FactoryError> {
        let (token_0, token_1) = derivation::sort_tokens(&env, &token_a, &token_b)?;

        let mut factory_storage =
            storage::get_factory_storage(&env).ok_or(FactoryError::NotInitialized)?;

        if storage::get_pair(&env, &token_0, &token_1).is_some() {
            return Err(FactoryError::PairExists);
        }

        // 1. Deploy Pair at its derived address
        let salt = derivation::pair_salt(&env, &token_0, &token_1, &factory_storage.pair_wasm_hash);
        let pair_address = env
            .deployer()
            .with_current_contract(salt)
            .deploy(factory_storage.pair_wasm_hash.clone());

        // 2. Initialize Pair
        PairClient::new(&env, &pair_address).initialize(
            &env.current_contract_address(),
            &token_0,
            &token_1,
        );

        // 3. Record the pair and emit
        record_pair(&env, &mut factory_storage, &token_a, &token_b, &pair_address);

        Ok(pair_address)
    }

    pub fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address> {
        storage::get_pair(&env, &token_a, &token_b)
    }

    pub fn all_pairs(env: Env, index: u32) -> Option<Address> {
        storage::get_pair_at(&env, index)
    }

    pub fn all_pairs_length(env: Env) -> u32 {
        storage::get_factory_storage(&env)
            .map(|s| s.pair_count)
            .unwrap_or(0)
    }

    /// Offline derivation of the address `create_pair` deploys to.
    pub fn pair_address(
        env: Env,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address, FactoryError> {
        let (token_0, token_1) = derivation::sort_tokens(&env, &token_a, &token_b)?;
        let factory_storage =
            storage::get_factory_storage(&env).ok_or(FactoryError::NotInitialized)?;
        Ok(derivation::pair_address(
            &env,
            &env.current_contract_address(),
            &token_0,
            &token_1,
            &factory_storage.pair_wasm_hash,
        ))
    }

    pub fn pair_wasm_hash(env: Env) -> Option<BytesN<32>> {
        storage::get_factory_storage(&env).map(|s| s.pair_wasm_hash)
    }

    pub fn fee_to(env: Env) -> Option<Address> {
        storage::get_factory_storage(&env).and_then(|s| s.fee_to)
    }

    pub fn fee_to_setter(env: Env) -> Option<Address> {
        storage::get_factory_storage(&env).map(|s| s.fee_to_setter)
    }

    pub fn set_fee_to(
        env: Env,
        caller: Address,
        fee_to: Option<Address>,
    ) -> Result<(), FactoryError> {
        caller.require_auth();
        let mut factory_storage =
            storage::get_factory_storage(&env).ok_or(FactoryError::NotInitialized)?;
        if caller != factory_storage.fee_to_setter {
            return Err(FactoryError::Forbidden);
        }
        factory_storage.fee_to = fee_to;
        storage::set_factory_storage(&env, &factory_storage);
        storage::extend_instance_ttl(&env);
        FactoryEvents::fee_to_changed(&env, &factory_storage.fee_to);
        Ok(())
    }

    pub fn set_fee_to_setter(
        env: Env,
        caller: Address,
        fee_to_setter: Address,
    ) -> Result<(), FactoryError> {
        caller.require_auth();
        let mut factory_storage =
            storage::get_factory_storage(&env).ok_or(FactoryError::NotInitialized)?;
        if caller != factory_storage.fee_to_setter {
            return Err(FactoryError::Forbidden);
        }
        factory_storage.fee_to_setter = fee_to_setter;
        storage::set_factory_storage(&env, &factory_storage);
        storage::extend_instance_ttl(&env);
        FactoryEvents::fee_to_setter_changed(&env, &factory_storage.fee_to_setter);
        Ok(())
    }
}
