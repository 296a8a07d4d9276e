#![no_std]

use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Flash Swap Receiver Interface.
/// Contracts that request a swap with non-empty `data` must implement this trait.
/// The Pair contract invokes `on_flash_swap` on the swap recipient after the
/// optimistic output transfer. The receiver MUST deliver payment to `pair`
/// before the callback returns, otherwise the whole swap reverts.
#[contractclient(name = "FlashReceiverClient")]
pub trait FlashReceiver {
    fn on_flash_swap(
        env: Env,
        pair: Address,
        token_a: Address,
        token_b: Address,
        amount_a_out: i128,
        amount_b_out: i128,
        data: Bytes,
    );
}
