use soroban_sdk::{Env, U256};

use crate::{errors::PairError, math, storage::PairStorage};

// Cumulative price oracle (TWAP support).
// Each accumulator integrates a Q112.112 price over seconds and wraps at 2^256;
// readers only ever difference two observations.

/// Current ledger time reduced modulo 2^32.
pub fn block_timestamp(env: &Env) -> u32 {
    // Truncation is the modular reduction.
    env.ledger().timestamp() as u32
}

/// Accumulates `elapsed * price` into both accumulators using the reserves
/// stored in `state` (the values in force before this update).
///
/// Elapsed time is computed with wrapping subtraction so a 2^32 rollover of
/// the timestamp still yields the true interval.
pub fn update_cumulative_prices(
    env: &Env,
    state: &mut PairStorage,
    block_timestamp: u32,
) -> Result<(), PairError> {
    let time_elapsed = block_timestamp.wrapping_sub(state.block_timestamp_last);
    if time_elapsed == 0 || state.reserve_a == 0 || state.reserve_b == 0 {
        return Ok(());
    }
    let elapsed = U256::from_u32(env, time_elapsed);

    let price_a = math::encode_price(env, state.reserve_b, state.reserve_a)?.mul(&elapsed);
    let price_b = math::encode_price(env, state.reserve_a, state.reserve_b)?.mul(&elapsed);

    state.price_a_cumulative = math::wrapping_add(env, &state.price_a_cumulative, &price_a);
    state.price_b_cumulative = math::wrapping_add(env, &state.price_b_cumulative, &price_b);
    Ok(())
}

/// Time-weighted average price (Q112.112) between two accumulator readings
/// taken `time_elapsed` seconds apart. Returns `None` for an empty interval.
pub fn consult_twap(
    env: &Env,
    price_cumulative_start: &U256,
    price_cumulative_end: &U256,
    time_elapsed: u32,
) -> Option<U256> {
    if time_elapsed == 0 {
        return None;
    }
    let delta = math::wrapping_sub(env, price_cumulative_end, price_cumulative_start);
    Some(delta.div(&U256::from_u32(env, time_elapsed)))
}
