#![cfg(test)]

// ---------------------------------------------------------------------------
// Pair test suite
//
// Every integration test runs the pair natively against two Stellar Asset
// Contracts (sorted so `token_a < token_b`) and a stub registry that only
// answers `fee_to`.
// ---------------------------------------------------------------------------


use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use crate::{Pair, PairClient};

pub const E18: i128 = 1_000_000_000_000_000_000;

pub mod stub_factory {
    use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env};

    #[contract]
    pub struct StubFactory;

    #[contractimpl]
    impl StubFactory {
        pub fn fee_to(env: Env) -> Option<Address> {
            env.storage().instance().get(&symbol_short!("fee_to"))
        }

        pub fn set_fee_to(env: Env, fee_to: Address) {
            env.storage().instance().set(&symbol_short!("fee_to"), &fee_to);
        }
    }
}
use stub_factory::{StubFactory, StubFactoryClient};

pub struct Setup<'a> {
    pub env: Env,
    pub user: Address,
    pub factory: StubFactoryClient<'a>,
    pub pair_id: Address,
    pub pair: PairClient<'a>,
    pub token_a: TokenClient<'a>,
    pub token_b: TokenClient<'a>,
    pub admin_a: StellarAssetClient<'a>,
    pub admin_b: StellarAssetClient<'a>,
}

impl<'a> Setup<'a> {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.budget().reset_unlimited();

        let issuer = Address::generate(&env);
        let user = Address::generate(&env);

        let first = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let second = env.register_stellar_asset_contract_v2(issuer).address();
        let (token_a, token_b) = if first < second {
            (first, second)
        } else {
            (second, first)
        };

        let factory_id = env.register_contract(None, StubFactory);
        let pair_id = env.register_contract(None, Pair);
        let pair = PairClient::new(&env, &pair_id);
        pair.initialize(&factory_id, &token_a, &token_b);

        Setup {
            user,
            factory: StubFactoryClient::new(&env, &factory_id),
            pair,
            token_a: TokenClient::new(&env, &token_a),
            token_b: TokenClient::new(&env, &token_b),
            admin_a: StellarAssetClient::new(&env, &token_a),
            admin_b: StellarAssetClient::new(&env, &token_b),
            pair_id,
            env,
        }
    }

    /// Sends assets straight into the pair's custody.
    pub fn deposit(&self, amount_a: i128, amount_b: i128) {
        if amount_a > 0 {
            self.admin_a.mint(&self.pair_id, &amount_a);
        }
        if amount_b > 0 {
            self.admin_b.mint(&self.pair_id, &amount_b);
        }
    }

    /// Deposits both assets and mints the shares to `user`.
    pub fn add_liquidity(&self, amount_a: i128, amount_b: i128) -> i128 {
        self.deposit(amount_a, amount_b);
        self.pair.mint(&self.user)
    }

    /// Moves `amount` of the user's shares into the pair and burns them.
    pub fn remove_liquidity(&self, amount: i128) -> (i128, i128) {
        self.pair.transfer(&self.user, &self.pair_id, &amount);
        self.pair.burn(&self.user)
    }
}
