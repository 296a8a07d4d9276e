//! Integer arithmetic for reserves, shares and Q112.112 prices.
//!
//! Products of two reserves need up to 224 bits, so every intermediate that
//! can exceed `i128` is computed with the host `U256` type. Host arithmetic
//! traps on overflow; the only intentionally wrapping operation is
//! [`wrapping_add`], used by the price accumulators.

use soroban_sdk::{Env, U256};

use crate::errors::PairError;

/// Shares locked forever on the first deposit so supply never returns to zero.
pub const MINIMUM_LIQUIDITY: i128 = 1_000;
/// Swap fee charged on the input side: `SWAP_FEE_NUMERATOR / FEE_DENOMINATOR` (0.3%).
pub const SWAP_FEE_NUMERATOR: i128 = 3;
pub const FEE_DENOMINATOR: i128 = 1_000;
/// The protocol receives `1 / (PROTOCOL_FEE_DIVISOR + 1)` of fee growth.
pub const PROTOCOL_FEE_DIVISOR: u32 = 5;
/// Reserves are bounded to 112 bits so a Q112.112 price fits in 224 bits.
pub const MAX_RESERVE: i128 = (1 << 112) - 1;
/// Fractional bits of an encoded price.
pub const RESOLUTION: u32 = 112;

pub fn u256(env: &Env, value: i128) -> Result<U256, PairError> {
    if value < 0 {
        return Err(PairError::NegativeAmount);
    }
    Ok(U256::from_u128(env, value as u128))
}

pub fn to_i128(value: &U256) -> Result<i128, PairError> {
    value
        .to_u128()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(PairError::Overflow)
}

/// `a * b` widened to 256 bits.
pub fn mul(env: &Env, a: i128, b: i128) -> Result<U256, PairError> {
    Ok(u256(env, a)?.mul(&u256(env, b)?))
}

/// Floor of `a * b / denominator` without intermediate overflow.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, PairError> {
    if denominator <= 0 {
        return Err(PairError::Overflow);
    }
    to_i128(&mul(env, a, b)?.div(&u256(env, denominator)?))
}

fn bit_length(value: &U256) -> u32 {
    let bytes = value.to_be_bytes();
    for (i, byte) in bytes.iter().enumerate() {
        if byte != 0 {
            return (bytes.len() - i as u32) * 8 - byte.leading_zeros();
        }
    }
    0
}

/// Integer square root (floor) by Newton's method.
///
/// The first guess `2^ceil(bits/2)` is never below the root, so the iteration
/// decreases monotonically and stops at the floor.
pub fn sqrt(env: &Env, value: &U256) -> U256 {
    let zero = U256::from_u32(env, 0);
    if *value == zero {
        return zero;
    }
    let mut x = U256::from_u32(env, 1).shl((bit_length(value) + 1) / 2);
    loop {
        let y = x.add(&value.div(&x)).shr(1);
        if y >= x {
            return x;
        }
        x = y;
    }
}

pub fn u256_max(env: &Env) -> U256 {
    U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

/// `a + b mod 2^256`.
pub fn wrapping_add(env: &Env, a: &U256, b: &U256) -> U256 {
    let room = u256_max(env).sub(a);
    if *b <= room {
        a.add(b)
    } else {
        b.sub(&room).sub(&U256::from_u32(env, 1))
    }
}

/// `a - b mod 2^256`.
pub fn wrapping_sub(env: &Env, a: &U256, b: &U256) -> U256 {
    if a >= b {
        a.sub(b)
    } else {
        u256_max(env).sub(b).add(a).add(&U256::from_u32(env, 1))
    }
}

/// Encodes `numerator / denominator` as an unsigned Q112.112 value.
pub fn encode_price(env: &Env, numerator: i128, denominator: i128) -> Result<U256, PairError> {
    if denominator <= 0 {
        return Err(PairError::Overflow);
    }
    Ok(u256(env, numerator)?.shl(RESOLUTION).div(&u256(env, denominator)?))
}
