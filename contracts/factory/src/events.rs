use soroban_sdk::{symbol_short, Address, Env};

pub struct FactoryEvents;

impl FactoryEvents {
    /// Topics: `("pair_new", token_a, token_b)` in the order the caller passed them.
    /// Data:   `(pair, pair_count)` where `pair_count` includes the new pair.
    pub fn pair_created(
        env: &Env,
        token_a: &Address,
        token_b: &Address,
        pair: &Address,
        pair_count: u32,
    ) {
        env.events().publish(
            (symbol_short!("pair_new"), token_a, token_b),
            (pair, pair_count),
        );
    }

    pub fn fee_to_changed(env: &Env, fee_to: &Option<Address>) {
        env.events()
            .publish((symbol_short!("fee_to"),), fee_to.clone());
    }

    pub fn fee_to_setter_changed(env: &Env, fee_to_setter: &Address) {
        env.events()
            .publish((symbol_short!("fee_set"),), fee_to_setter);
    }
}
