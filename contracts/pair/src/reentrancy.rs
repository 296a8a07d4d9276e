use soroban_sdk::Env;

use crate::{
    errors::PairError,
    storage::{get_reentrancy_guard, set_reentrancy_guard, ReentrancyGuard},
};

/// Acquires the reentrancy lock. Reverts with `Locked` if already held.
pub fn acquire(env: &Env) -> Result<(), PairError> {
    let guard = get_reentrancy_guard(env);
    if guard.locked {
        return Err(PairError::Locked);
    }
    set_reentrancy_guard(env, &ReentrancyGuard { locked: true });
    Ok(())
}

/// Releases the reentrancy lock.
pub fn release(env: &Env) {
    set_reentrancy_guard(env, &ReentrancyGuard { locked: false });
}

/// Runs `f` while holding the lock, releasing it on both the `Ok` and `Err`
/// paths. A nested call into the same pair fails with `Locked` instead of
/// waiting.
pub fn with_lock<T>(
    env: &Env,
    f: impl FnOnce() -> Result<T, PairError>,
) -> Result<T, PairError> {
    acquire(env)?;
    let result = f();
    release(env);
    result
}
