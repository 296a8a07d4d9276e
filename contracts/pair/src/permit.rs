//! Off-chain signed approvals.
//!
//! An owner is a Stellar account identified by its ed25519 public key. The
//! signed message binds the network, this pair, the owner's current nonce and
//! a deadline, so a signature is valid for exactly one approval on one pool.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::{errors::PairError, share, storage};

const DOMAIN_TAG: &[u8] = b"LagoonDomain(string name,string version,bytes32 network,address pair)";
const PERMIT_TAG: &[u8] =
    b"Permit(address owner,address spender,i128 value,u64 nonce,u32 expiration_ledger,u64 deadline)";
const VERSION: &[u8] = b"1";

const ACCOUNT_VERSION_BYTE: u8 = 6 << 3;
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// The `G...` account address controlled by `public_key`.
pub fn account_address(env: &Env, public_key: &BytesN<32>) -> Address {
    // version byte || key || crc16 (little endian): 35 bytes, 56 base32 chars.
    let mut payload = [0u8; 35];
    payload[0] = ACCOUNT_VERSION_BYTE;
    payload[1..33].copy_from_slice(&public_key.to_array());
    let checksum = crc16_xmodem(&payload[..33]);
    payload[33..].copy_from_slice(&checksum.to_le_bytes());

    let mut encoded = [0u8; 56];
    let mut buffer: u32 = 0;
    let mut bits = 0;
    let mut out = 0;
    for byte in payload {
        buffer = ((buffer << 8) | byte as u32) & 0xffff;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            encoded[out] = BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize];
            out += 1;
        }
    }
    Address::from_string_bytes(&Bytes::from_array(env, &encoded))
}

pub fn domain_separator(env: &Env) -> BytesN<32> {
    let mut data = Bytes::from_slice(env, DOMAIN_TAG);
    data.append(&Bytes::from_slice(env, share::NAME.as_bytes()));
    data.append(&Bytes::from_slice(env, VERSION));
    data.extend_from_array(&env.ledger().network_id().to_array());
    data.append(&env.current_contract_address().to_xdr(env));
    env.crypto().sha256(&data).to_bytes()
}

/// Message the owner signs: `0x19 0x01 || domain || sha256(permit fields)`.
pub fn permit_message(
    env: &Env,
    owner: &Address,
    spender: &Address,
    value: i128,
    nonce: u64,
    expiration_ledger: u32,
    deadline: u64,
) -> Bytes {
    let mut fields = Bytes::from_slice(env, PERMIT_TAG);
    fields.append(&owner.clone().to_xdr(env));
    fields.append(&spender.clone().to_xdr(env));
    fields.extend_from_array(&value.to_be_bytes());
    fields.extend_from_array(&nonce.to_be_bytes());
    fields.extend_from_array(&expiration_ledger.to_be_bytes());
    fields.extend_from_array(&deadline.to_be_bytes());
    let struct_hash = env.crypto().sha256(&fields);

    let mut message = Bytes::from_array(env, &[0x19, 0x01]);
    message.extend_from_array(&domain_separator(env).to_array());
    message.extend_from_array(&struct_hash.to_array());
    message
}

/// Verifies `signature` over the permit message for the owner's current nonce,
/// consumes the nonce and records the allowance.
///
/// # Errors
/// | Error      | Condition                        |
/// |------------|----------------------------------|
/// | `Expired`  | ledger timestamp is past `deadline` |
///
/// A signature that does not verify (wrong key, stale nonce, altered fields)
/// traps inside `ed25519_verify` and reverts the call.
pub fn permit(
    env: &Env,
    owner_key: &BytesN<32>,
    spender: &Address,
    value: i128,
    expiration_ledger: u32,
    deadline: u64,
    signature: &BytesN<64>,
) -> Result<(), PairError> {
    if env.ledger().timestamp() > deadline {
        return Err(PairError::Expired);
    }
    let owner = account_address(env, owner_key);
    let nonce = storage::get_nonce(env, &owner);
    let message = permit_message(
        env,
        &owner,
        spender,
        value,
        nonce,
        expiration_ledger,
        deadline,
    );
    env.crypto().ed25519_verify(owner_key, &message, signature);

    storage::set_nonce(env, &owner, nonce + 1);
    share::approve(env, &owner, spender, value, expiration_ledger)
}
