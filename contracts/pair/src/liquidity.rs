use soroban_sdk::{token::TokenClient, Address, Env};

use crate::{
    errors::PairError,
    events::PairEvents,
    math::{self, MINIMUM_LIQUIDITY},
    pool, share,
    storage::{get_pair_state, set_pair_state},
};

/// Issues shares for whatever was deposited since the last reserve update.
///
/// The first deposit mints `sqrt(amount_a * amount_b) - MINIMUM_LIQUIDITY`
/// and locks `MINIMUM_LIQUIDITY` with an unspendable holder. Later deposits
/// get the smaller of the two pro-rata amounts, so the worse-priced side
/// decides.
///
/// # Errors
/// | Error                         | Condition                                   |
/// |-------------------------------|---------------------------------------------|
/// | `NotInitialized`              | Pair storage not yet written by `initialize` |
/// | `InsufficientLiquidityMinted` | Deposit is worth no shares                  |
/// | `Overflow`                    | Balances exceed 112 bits                    |
pub fn execute_mint(env: &Env, to: &Address) -> Result<i128, PairError> {
    let mut state = get_pair_state(env).ok_or(PairError::NotInitialized)?;
    let (balance_a, balance_b) = pool::balances(env, &state);
    let amount_a = balance_a - state.reserve_a;
    let amount_b = balance_b - state.reserve_b;
    if amount_a < 0 || amount_b < 0 {
        return Err(PairError::InsufficientLiquidityMinted);
    }

    // Protocol shares are minted against the pre-deposit supply.
    let fee_on = pool::mint_fee(env, &mut state)?;
    let total_supply = share::total_supply(env);

    let liquidity = if total_supply == 0 {
        let root = math::to_i128(&math::sqrt(env, &math::mul(env, amount_a, amount_b)?))?;
        root - MINIMUM_LIQUIDITY
    } else {
        math::mul_div(env, amount_a, total_supply, state.reserve_a)?.min(math::mul_div(
            env,
            amount_b,
            total_supply,
            state.reserve_b,
        )?)
    };
    if liquidity <= 0 {
        return Err(PairError::InsufficientLiquidityMinted);
    }

    if total_supply == 0 {
        share::mint(env, &share::locked_liquidity_holder(env), MINIMUM_LIQUIDITY)?;
    }
    share::mint(env, to, liquidity)?;

    pool::update(env, &mut state, balance_a, balance_b)?;
    if fee_on {
        state.k_last = pool::current_k(env, &state)?;
    }
    set_pair_state(env, &state);

    PairEvents::mint(env, to, amount_a, amount_b);
    Ok(liquidity)
}

/// Redeems the shares the pair holds on its own balance for a pro-rata slice
/// of the current custodied balances, sent to `to`.
///
/// Balances, not reserves, are used so donated tokens are paid out too.
///
/// # Errors
/// | Error                         | Condition                                   |
/// |-------------------------------|---------------------------------------------|
/// | `NotInitialized`              | Pair storage not yet written by `initialize` |
/// | `InsufficientLiquidityBurned` | Either payout rounds to zero                |
pub fn execute_burn(env: &Env, to: &Address) -> Result<(i128, i128), PairError> {
    let mut state = get_pair_state(env).ok_or(PairError::NotInitialized)?;
    let contract = env.current_contract_address();
    let (balance_a, balance_b) = pool::balances(env, &state);
    let liquidity = share::balance(env, &contract);

    let fee_on = pool::mint_fee(env, &mut state)?;
    let total_supply = share::total_supply(env);
    if total_supply == 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }

    let amount_a = math::mul_div(env, liquidity, balance_a, total_supply)?;
    let amount_b = math::mul_div(env, liquidity, balance_b, total_supply)?;
    if amount_a <= 0 || amount_b <= 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }

    share::burn(env, &contract, liquidity)?;
    TokenClient::new(env, &state.token_a).transfer(&contract, to, &amount_a);
    TokenClient::new(env, &state.token_b).transfer(&contract, to, &amount_b);

    let (balance_a, balance_b) = pool::balances(env, &state);
    pool::update(env, &mut state, balance_a, balance_b)?;
    if fee_on {
        state.k_last = pool::current_k(env, &state)?;
    }
    set_pair_state(env, &state);

    PairEvents::burn(env, to, amount_a, amount_b);
    Ok((amount_a, amount_b))
}
