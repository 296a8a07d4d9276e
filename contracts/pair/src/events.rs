use soroban_sdk::{symbol_short, Address, Env};

pub struct PairEvents;

impl PairEvents {
    /// Emits a `swap` event after a successful swap or flash swap.
    ///
    /// Topics: `("swap", to)`
    /// Data:   `(amount_a_in, amount_b_in, amount_a_out, amount_b_out)`
    ///
    /// There is no sender field. `swap` is permissionless and takes no
    /// authorized caller, so the recipient is the only party on record.
    pub fn swap(
        env: &Env,
        to: &Address,
        amount_a_in: i128,
        amount_b_in: i128,
        amount_a_out: i128,
        amount_b_out: i128,
    ) {
        env.events().publish(
            (symbol_short!("swap"), to),
            (amount_a_in, amount_b_in, amount_a_out, amount_b_out),
        );
    }

    /// Topics: `("mint", to)`, data: the two deposited amounts.
    pub fn mint(env: &Env, to: &Address, amount_a: i128, amount_b: i128) {
        env.events().publish((symbol_short!("mint"), to), (amount_a, amount_b));
    }

    /// Topics: `("burn", to)`, data: the two withdrawn amounts.
    pub fn burn(env: &Env, to: &Address, amount_a: i128, amount_b: i128) {
        env.events().publish((symbol_short!("burn"), to), (amount_a, amount_b));
    }

    pub fn sync(env: &Env, reserve_a: i128, reserve_b: i128) {
        env.events().publish((symbol_short!("sync"),), (reserve_a, reserve_b));
    }
}
