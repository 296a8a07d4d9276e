#![no_std]

mod errors;
mod events;
mod factory;
mod liquidity;
pub mod math;
pub mod oracle;
mod permit;
mod pool;
mod reentrancy;
mod share;
mod storage;
mod swap;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; pair is no_std so we must opt-in explicitly.

#[cfg(test)]
mod test;

use soroban_sdk::{
    contract, contractimpl, token::TokenClient, Address, Bytes, BytesN, Env, String, U256,
};

pub use errors::PairError;
use storage::{get_pair_state, has_pair_state, set_pair_state, PairStorage};

#[contract]
pub struct Pair;

#[contractimpl]
impl Pair {
    /// Binds the pair to its registry and canonical asset order. Callable once,
    /// by the registry.
    pub fn initialize(
        env: Env,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> Result<(), PairError> {
        if has_pair_state(&env) {
            return Err(PairError::AlreadyInitialized);
        }
        factory.require_auth();

        let zero = U256::from_u32(&env, 0);
        set_pair_state(
            &env,
            &PairStorage {
                factory,
                token_a,
                token_b,
                reserve_a: 0,
                reserve_b: 0,
                block_timestamp_last: oracle::block_timestamp(&env),
                price_a_cumulative: zero.clone(),
                price_b_cumulative: zero.clone(),
                k_last: zero,
            },
        );
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn mint(env: Env, to: Address) -> Result<i128, PairError> {
        storage::extend_instance_ttl(&env);
        reentrancy::with_lock(&env, || liquidity::execute_mint(&env, &to))
    }

    pub fn burn(env: Env, to: Address) -> Result<(i128, i128), PairError> {
        storage::extend_instance_ttl(&env);
        reentrancy::with_lock(&env, || liquidity::execute_burn(&env, &to))
    }

    /// Sends the requested outputs to `to` and checks payment afterwards.
    /// A non-empty `data` turns the call into a flash swap: `to` receives an
    /// `on_flash_swap` callback before payment is checked.
    pub fn swap(
        env: Env,
        amount_a_out: i128,
        amount_b_out: i128,
        to: Address,
        data: Bytes,
    ) -> Result<(), PairError> {
        storage::extend_instance_ttl(&env);
        reentrancy::with_lock(&env, || {
            swap::execute_swap(&env, amount_a_out, amount_b_out, &to, &data)
        })
    }

    /// Sends any balance above the reserves to `to`.
    pub fn skim(env: Env, to: Address) -> Result<(), PairError> {
        storage::extend_instance_ttl(&env);
        reentrancy::with_lock(&env, || {
            let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
            let contract = env.current_contract_address();
            let (balance_a, balance_b) = pool::balances(&env, &state);
            if balance_a > state.reserve_a {
                TokenClient::new(&env, &state.token_a).transfer(
                    &contract,
                    &to,
                    &(balance_a - state.reserve_a),
                );
            }
            if balance_b > state.reserve_b {
                TokenClient::new(&env, &state.token_b).transfer(
                    &contract,
                    &to,
                    &(balance_b - state.reserve_b),
                );
            }
            Ok(())
        })
    }

    /// Forces reserves to match custodied balances.
    pub fn sync(env: Env) -> Result<(), PairError> {
        storage::extend_instance_ttl(&env);
        reentrancy::with_lock(&env, || {
            let mut state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
            let (balance_a, balance_b) = pool::balances(&env, &state);
            pool::update(&env, &mut state, balance_a, balance_b)?;
            set_pair_state(&env, &state);
            Ok(())
        })
    }

    pub fn get_reserves(env: Env) -> Result<(i128, i128, u32), PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok((state.reserve_a, state.reserve_b, state.block_timestamp_last))
    }

    pub fn price_a_cumulative_last(env: Env) -> Result<U256, PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok(state.price_a_cumulative)
    }

    pub fn price_b_cumulative_last(env: Env) -> Result<U256, PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok(state.price_b_cumulative)
    }

    pub fn k_last(env: Env) -> Result<U256, PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok(state.k_last)
    }

    pub fn factory(env: Env) -> Result<Address, PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok(state.factory)
    }

    pub fn token_a(env: Env) -> Result<Address, PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok(state.token_a)
    }

    pub fn token_b(env: Env) -> Result<Address, PairError> {
        let state = get_pair_state(&env).ok_or(PairError::NotInitialized)?;
        Ok(state.token_b)
    }

    // ----- share token -----

    pub fn name(env: Env) -> String {
        String::from_str(&env, share::NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, share::SYMBOL)
    }

    pub fn decimals(_env: Env) -> u32 {
        share::DECIMALS
    }

    pub fn total_supply(env: Env) -> i128 {
        share::total_supply(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        share::balance(&env, &id)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        share::allowance(&env, &from, &spender)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), PairError> {
        from.require_auth();
        storage::extend_instance_ttl(&env);
        share::approve(&env, &from, &spender, amount, expiration_ledger)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), PairError> {
        from.require_auth();
        storage::extend_instance_ttl(&env);
        share::transfer(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), PairError> {
        spender.require_auth();
        storage::extend_instance_ttl(&env);
        share::spend_allowance(&env, &from, &spender, amount)?;
        share::transfer(&env, &from, &to, amount)
    }

    pub fn nonces(env: Env, owner: Address) -> u64 {
        storage::get_nonce(&env, &owner)
    }

    pub fn domain_separator(env: Env) -> BytesN<32> {
        permit::domain_separator(&env)
    }

    /// Approval signed off-chain by the ed25519 key behind a Stellar account.
    pub fn permit(
        env: Env,
        owner_key: BytesN<32>,
        spender: Address,
        value: i128,
        expiration_ledger: u32,
        deadline: u64,
        signature: BytesN<64>,
    ) -> Result<(), PairError> {
        storage::extend_instance_ttl(&env);
        permit::permit(
            &env,
            &owner_key,
            &spender,
            value,
            expiration_ledger,
            deadline,
            &signature,
        )
    }
}
