//! Pool-share bookkeeping. The pair is its own SEP-41 token: balances live in
//! persistent storage, allowances in temporary storage, supply in instance
//! storage.

use soroban_sdk::{Address, Env, String};
use soroban_token_sdk::TokenUtils;

use crate::{
    errors::PairError,
    storage::{self, AllowanceEntry},
};

pub const NAME: &str = "Lagoon LP";
pub const SYMBOL: &str = "LAGOON-LP";
pub const DECIMALS: u32 = 7;

/// Stellar account with an all-zero key. Nobody can sign for it, so shares
/// sent here are locked forever.
pub const LOCKED_LIQUIDITY_HOLDER: &str =
    "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn locked_liquidity_holder(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, LOCKED_LIQUIDITY_HOLDER))
}

fn check_nonnegative(amount: i128) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::NegativeAmount);
    }
    Ok(())
}

fn receive_balance(env: &Env, id: &Address, amount: i128) -> Result<(), PairError> {
    let balance = storage::get_balance(env, id);
    let updated = balance.checked_add(amount).ok_or(PairError::Overflow)?;
    storage::set_balance(env, id, updated);
    Ok(())
}

fn spend_balance(env: &Env, id: &Address, amount: i128) -> Result<(), PairError> {
    let balance = storage::get_balance(env, id);
    if balance < amount {
        return Err(PairError::InsufficientBalance);
    }
    storage::set_balance(env, id, balance - amount);
    Ok(())
}

pub fn total_supply(env: &Env) -> i128 {
    storage::get_total_supply(env)
}

pub fn balance(env: &Env, id: &Address) -> i128 {
    storage::get_balance(env, id)
}

/// Issues new shares to `to`.
pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<(), PairError> {
    check_nonnegative(amount)?;
    let supply = total_supply(env)
        .checked_add(amount)
        .ok_or(PairError::Overflow)?;
    receive_balance(env, to, amount)?;
    storage::set_total_supply(env, supply);
    TokenUtils::new(env)
        .events()
        .mint(env.current_contract_address(), to.clone(), amount);
    Ok(())
}

/// Destroys shares held by `from`.
pub fn burn(env: &Env, from: &Address, amount: i128) -> Result<(), PairError> {
    check_nonnegative(amount)?;
    spend_balance(env, from, amount)?;
    storage::set_total_supply(env, total_supply(env) - amount);
    TokenUtils::new(env).events().burn(from.clone(), amount);
    Ok(())
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), PairError> {
    check_nonnegative(amount)?;
    spend_balance(env, from, amount)?;
    receive_balance(env, to, amount)?;
    TokenUtils::new(env)
        .events()
        .transfer(from.clone(), to.clone(), amount);
    Ok(())
}

/// Live allowance; an entry past its expiration ledger reads as zero.
pub fn allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    match storage::get_allowance(env, from, spender) {
        Some(entry) if entry.expiration_ledger >= env.ledger().sequence() => entry.amount,
        _ => 0,
    }
}

pub fn approve(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), PairError> {
    check_nonnegative(amount)?;
    if amount > 0 && expiration_ledger < env.ledger().sequence() {
        return Err(PairError::Expired);
    }
    storage::set_allowance(
        env,
        from,
        spender,
        &AllowanceEntry {
            amount,
            expiration_ledger,
        },
    );
    TokenUtils::new(env)
        .events()
        .approve(from.clone(), spender.clone(), amount, expiration_ledger);
    Ok(())
}

/// Deducts `amount` from the allowance. `i128::MAX` is an infinite approval
/// and is never decremented.
pub fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), PairError> {
    check_nonnegative(amount)?;
    let current = allowance(env, from, spender);
    if current < amount {
        return Err(PairError::InsufficientAllowance);
    }
    if current == i128::MAX || amount == 0 {
        return Ok(());
    }
    if let Some(entry) = storage::get_allowance(env, from, spender) {
        storage::set_allowance(
            env,
            from,
            spender,
            &AllowanceEntry {
                amount: current - amount,
                expiration_ledger: entry.expiration_ledger,
            },
        );
    }
    Ok(())
}
