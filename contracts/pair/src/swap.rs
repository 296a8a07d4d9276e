use soroban_sdk::{log, token::TokenClient, Address, Bytes, Env};

use lagoon_flash_receiver_interface::FlashReceiverClient;

use crate::{
    errors::PairError,
    events::PairEvents,
    math::{self, FEE_DENOMINATOR, SWAP_FEE_NUMERATOR},
    pool,
    storage::{get_pair_state, set_pair_state},
};

/// Input paid on one side: whatever the balance exceeds `reserve - amount_out`.
fn amount_in(balance: i128, reserve: i128, amount_out: i128) -> i128 {
    let floor = reserve - amount_out;
    if balance > floor {
        balance - floor
    } else {
        0
    }
}

/// `balance * 1000 - amount_in * 3`: the balance with the input fee removed.
fn fee_adjusted(balance: i128, amount_in: i128) -> Result<i128, PairError> {
    let scaled = balance
        .checked_mul(FEE_DENOMINATOR)
        .ok_or(PairError::Overflow)?;
    let fee = amount_in
        .checked_mul(SWAP_FEE_NUMERATOR)
        .ok_or(PairError::Overflow)?;
    scaled.checked_sub(fee).ok_or(PairError::Overflow)
}

/// Executes a swap, optionally as a flash swap.
///
/// # Flow
/// 1. **Pre-flight checks**: output amounts, pair initialized, outputs
///    strictly below reserves, recipient is not a pooled asset.
/// 2. **Optimistic transfer**: send the requested outputs to `to`.
/// 3. **Callback**: when `data` is non-empty, call `to.on_flash_swap(...)`.
///    Payment must reach the pair before the callback returns.
/// 4. **Input accounting**: derive inputs from the post-callback balances.
/// 5. **k-invariant**: fee-adjusted product must not fall below the old one.
/// 6. **Persist + emit**.
///
/// The caller holds the reentrancy lock for the whole flow.
///
/// # Errors
/// | Error                      | Condition                                      |
/// |----------------------------|------------------------------------------------|
/// | `InsufficientOutputAmount` | Both outputs zero, or either negative          |
/// | `NotInitialized`           | Pair storage not yet written by `initialize`    |
/// | `InsufficientLiquidity`    | An output is not strictly below its reserve    |
/// | `InvalidTo`                | `to` is one of the pooled assets               |
/// | `InsufficientInputAmount`  | Nothing was paid in on either side             |
/// | `InvalidK`                 | Fee-adjusted product dropped                   |
/// | `Overflow`                 | Fee-adjusted balance exceeds `i128`            |
pub fn execute_swap(
    env: &Env,
    amount_a_out: i128,
    amount_b_out: i128,
    to: &Address,
    data: &Bytes,
) -> Result<(), PairError> {
    // -----------------------------------------------------------------------
    // 1. Pre-flight checks (no state mutation)
    // -----------------------------------------------------------------------
    if amount_a_out < 0 || amount_b_out < 0 || (amount_a_out == 0 && amount_b_out == 0) {
        return Err(PairError::InsufficientOutputAmount);
    }

    let mut state = get_pair_state(env).ok_or(PairError::NotInitialized)?;
    if amount_a_out >= state.reserve_a || amount_b_out >= state.reserve_b {
        return Err(PairError::InsufficientLiquidity);
    }
    if *to == state.token_a || *to == state.token_b {
        return Err(PairError::InvalidTo);
    }

    // -----------------------------------------------------------------------
    // 2. Optimistic transfer
    // -----------------------------------------------------------------------
    let contract = env.current_contract_address();
    if amount_a_out > 0 {
        TokenClient::new(env, &state.token_a).transfer(&contract, to, &amount_a_out);
    }
    if amount_b_out > 0 {
        TokenClient::new(env, &state.token_b).transfer(&contract, to, &amount_b_out);
    }

    // -----------------------------------------------------------------------
    // 3. Flash-swap callback
    // -----------------------------------------------------------------------
    if !data.is_empty() {
        log!(env, "flash swap callback", to.clone(), amount_a_out, amount_b_out);
        FlashReceiverClient::new(env, to).on_flash_swap(
            &contract,
            &state.token_a,
            &state.token_b,
            &amount_a_out,
            &amount_b_out,
            data,
        );
    }

    // -----------------------------------------------------------------------
    // 4. Input accounting
    // -----------------------------------------------------------------------
    let (balance_a, balance_b) = pool::balances(env, &state);
    let amount_a_in = amount_in(balance_a, state.reserve_a, amount_a_out);
    let amount_b_in = amount_in(balance_b, state.reserve_b, amount_b_out);
    if amount_a_in <= 0 && amount_b_in <= 0 {
        return Err(PairError::InsufficientInputAmount);
    }

    // -----------------------------------------------------------------------
    // 5. k-invariant with the input fee removed
    // -----------------------------------------------------------------------
    let adjusted_a = fee_adjusted(balance_a, amount_a_in)?;
    let adjusted_b = fee_adjusted(balance_b, amount_b_in)?;
    let adjusted_k = math::mul(env, adjusted_a, adjusted_b)?;
    let required_k = math::mul(env, state.reserve_a, state.reserve_b)?
        .mul(&math::u256(env, FEE_DENOMINATOR)?.pow(2));
    if adjusted_k < required_k {
        return Err(PairError::InvalidK);
    }

    // -----------------------------------------------------------------------
    // 6. Persist + emit
    // -----------------------------------------------------------------------
    pool::update(env, &mut state, balance_a, balance_b)?;
    set_pair_state(env, &state);

    PairEvents::swap(env, to, amount_a_in, amount_b_in, amount_a_out, amount_b_out);
    Ok(())
}
