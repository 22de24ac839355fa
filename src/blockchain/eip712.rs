// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EIP-712 hashing for forwarder meta-transactions.
//!
//! The forwarder contract verifies signatures over
//! `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(TxMessage))`. Both type
//! schemas are declared with `sol!`, so the type strings and field order are
//! exactly what the contract hashes:
//!
//! - `EIP712Domain(address verifyingContract,uint256 chainId)`
//! - `TxMessage(address signer,address to,bytes data,uint256 nonce)`
//!
//! alloy's `Eip712Domain` orders `chainId` before `verifyingContract`, so the
//! domain schema is declared here instead.

use alloy::{
    primitives::{keccak256, Address, Bytes, B256, U256},
    sol,
    sol_types::SolStruct,
};

use super::types::ForwarderDomain;

sol! {
    /// Domain schema of the forwarder contract.
    #[derive(Debug, PartialEq, Eq)]
    struct EIP712Domain {
        address verifyingContract;
        uint256 chainId;
    }

    /// A call the admin asks the forwarder to execute.
    #[derive(Debug, PartialEq, Eq)]
    struct TxMessage {
        address signer;
        address to;
        bytes data;
        uint256 nonce;
    }
}

/// Prefix separating EIP-712 digests from every other signing scheme.
const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

/// Hash of the domain descriptor (`hashStruct(EIP712Domain)`).
pub fn domain_separator(domain: &ForwarderDomain) -> B256 {
    EIP712Domain {
        verifyingContract: domain.verifying_contract,
        chainId: U256::from(domain.chain_id),
    }
    .eip712_hash_struct()
}

/// Hash of a single forward message (`hashStruct(TxMessage)`).
pub fn message_hash(message: &TxMessage) -> B256 {
    message.eip712_hash_struct()
}

/// Final digest the admin signs for `message` under `domain`.
pub fn hash_tx_message(domain: &ForwarderDomain, message: &TxMessage) -> B256 {
    let mut preimage = [0u8; 66];
    preimage[..2].copy_from_slice(&EIP712_PREFIX);
    preimage[2..34].copy_from_slice(domain_separator(domain).as_slice());
    preimage[34..].copy_from_slice(message_hash(message).as_slice());
    keccak256(preimage)
}

impl TxMessage {
    pub fn new(signer: Address, to: Address, data: impl Into<Bytes>, nonce: U256) -> Self {
        Self {
            signer,
            to,
            data: data.into(),
            nonce,
        }
    }
}
