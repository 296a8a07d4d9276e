//! Reserve bookkeeping shared by every state-changing entry point.

use soroban_sdk::{log, token::TokenClient, Env, U256};

use crate::{
    errors::PairError,
    events::PairEvents,
    factory::FactoryClient,
    math::{self, MAX_RESERVE, PROTOCOL_FEE_DIVISOR},
    oracle, share,
    storage::PairStorage,
};

/// Custodied balances of both assets.
pub fn balances(env: &Env, state: &PairStorage) -> (i128, i128) {
    let contract = env.current_contract_address();
    (
        TokenClient::new(env, &state.token_a).balance(&contract),
        TokenClient::new(env, &state.token_b).balance(&contract),
    )
}

/// Accumulates prices over the reserves in force, then makes `balance_*` the
/// new reserves and stamps the current time.
pub fn update(
    env: &Env,
    state: &mut PairStorage,
    balance_a: i128,
    balance_b: i128,
) -> Result<(), PairError> {
    if !(0..=MAX_RESERVE).contains(&balance_a) || !(0..=MAX_RESERVE).contains(&balance_b) {
        return Err(PairError::Overflow);
    }
    let now = oracle::block_timestamp(env);
    oracle::update_cumulative_prices(env, state, now)?;

    state.reserve_a = balance_a;
    state.reserve_b = balance_b;
    state.block_timestamp_last = now;
    PairEvents::sync(env, balance_a, balance_b);
    Ok(())
}

/// Mints the protocol's share of fee growth since the last liquidity event.
///
/// Returns whether fee collection is on. When it is off, a stale `k_last`
/// is cleared so switching it back on later does not bill past growth.
pub fn mint_fee(env: &Env, state: &mut PairStorage) -> Result<bool, PairError> {
    let zero = U256::from_u32(env, 0);
    let fee_to = match FactoryClient::new(env, &state.factory).fee_to() {
        Some(fee_to) => fee_to,
        None => {
            if state.k_last != zero {
                state.k_last = zero;
            }
            return Ok(false);
        }
    };
    if state.k_last == zero {
        return Ok(true);
    }

    let root_k = math::sqrt(env, &math::mul(env, state.reserve_a, state.reserve_b)?);
    let root_k_last = math::sqrt(env, &state.k_last);
    if root_k > root_k_last {
        let supply = math::u256(env, share::total_supply(env))?;
        let numerator = supply.mul(&root_k.sub(&root_k_last));
        let denominator = root_k
            .mul(&U256::from_u32(env, PROTOCOL_FEE_DIVISOR))
            .add(&root_k_last);
        let liquidity = math::to_i128(&numerator.div(&denominator))?;
        if liquidity > 0 {
            log!(env, "protocol fee minted", fee_to, liquidity);
            share::mint(env, &fee_to, liquidity)?;
        }
    }
    Ok(true)
}

/// Invariant snapshot recorded after a fee-bearing mint or burn.
pub fn current_k(env: &Env, state: &PairStorage) -> Result<U256, PairError> {
    math::mul(env, state.reserve_a, state.reserve_b)
}
