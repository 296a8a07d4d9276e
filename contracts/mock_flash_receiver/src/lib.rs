#![no_std]

use lagoon_flash_receiver_interface::FlashReceiver;
use soroban_sdk::{
    contract, contractclient, contractimpl, contracttype, token::TokenClient, Address, Bytes, Env,
};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Repayment,
}

/// Amounts paid back to the pair when the callback receives `b"repay"`.
#[contracttype]
#[derive(Clone, Debug, Default)]
pub struct Repayment {
    pub amount_a: i128,
    pub amount_b: i128,
}

#[contractclient(name = "PairSyncClient")]
pub trait PairSync {
    fn sync(env: Env);
}

#[contract]
pub struct MockFlashReceiver;

#[contractimpl]
impl MockFlashReceiver {
    pub fn configure(env: Env, amount_a: i128, amount_b: i128) {
        env.storage()
            .instance()
            .set(&DataKey::Repayment, &Repayment { amount_a, amount_b });
    }
}

#[contractimpl]
impl FlashReceiver for MockFlashReceiver {
    fn on_flash_swap(
        env: Env,
        pair: Address,
        token_a: Address,
        token_b: Address,
        _amount_a_out: i128,
        _amount_b_out: i128,
        data: Bytes,
    ) {
        let repay_bytes = Bytes::from_slice(&env, b"repay");
        let reenter_bytes = Bytes::from_slice(&env, b"reenter");

        if data == repay_bytes {
            let repayment: Repayment = env
                .storage()
                .instance()
                .get(&DataKey::Repayment)
                .unwrap_or_default();
            let contract_address = env.current_contract_address();

            if repayment.amount_a > 0 {
                TokenClient::new(&env, &token_a).transfer(
                    &contract_address,
                    &pair,
                    &repayment.amount_a,
                );
            }
            if repayment.amount_b > 0 {
                TokenClient::new(&env, &token_b).transfer(
                    &contract_address,
                    &pair,
                    &repayment.amount_b,
                );
            }
        } else if data == reenter_bytes {
            PairSyncClient::new(&env, &pair).sync();
        }
        // Any other payload keeps the output without paying.
    }
}
