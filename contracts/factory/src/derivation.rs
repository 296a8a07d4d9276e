//! Deterministic pair addresses.
//!
//! A pair lives at the contract address derived from
//! `(factory, sha256(xdr(token_0) || xdr(token_1) || pair_wasm_hash))`, so
//! anyone holding the factory address and the pair code hash can compute it
//! without a lookup.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, String};

use crate::errors::FactoryError;

/// All-zero account and contract ids; never valid pooled assets.
const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
        || *address == Address::from_string(&String::from_str(env, ZERO_CONTRACT))
}

/// Validates an asset pair and returns it in canonical (ascending) order.
pub fn sort_tokens(
    env: &Env,
    token_a: &Address,
    token_b: &Address,
) -> Result<(Address, Address), FactoryError> {
    if token_a == token_b {
        return Err(FactoryError::IdenticalAssets);
    }
    if is_zero_address(env, token_a) || is_zero_address(env, token_b) {
        return Err(FactoryError::ZeroAddress);
    }
    if token_a < token_b {
        Ok((token_a.clone(), token_b.clone()))
    } else {
        Ok((token_b.clone(), token_a.clone()))
    }
}

pub fn pair_salt(
    env: &Env,
    token_0: &Address,
    token_1: &Address,
    pair_wasm_hash: &BytesN<32>,
) -> BytesN<32> {
    let mut salt_data = Bytes::new(env);
    salt_data.append(&token_0.clone().to_xdr(env));
    salt_data.append(&token_1.clone().to_xdr(env));
    salt_data.extend_from_array(&pair_wasm_hash.to_array());
    env.crypto().sha256(&salt_data).to_bytes()
}

/// Address the pair for `(token_0, token_1)` has, or will have once created,
/// under `factory`.
pub fn pair_address(
    env: &Env,
    factory: &Address,
    token_0: &Address,
    token_1: &Address,
    pair_wasm_hash: &BytesN<32>,
) -> Address {
    env.deployer()
        .with_address(
            factory.clone(),
            pair_salt(env, token_0, token_1, pair_wasm_hash),
        )
        .deployed_address()
}
