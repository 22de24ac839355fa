// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gnosis Safe proxy deployment calldata.

use alloy::{
    primitives::{keccak256, Address, Bytes, U256},
    sol,
    sol_types::{SolCall, SolValue},
};

// Only the entry points the relayer encodes calls for.
sol! {
    interface IGnosisSafe {
        function setup(
            address[] _owners,
            uint256 _threshold,
            address to,
            bytes data,
            address fallbackHandler,
            address paymentToken,
            uint256 payment,
            address paymentReceiver
        ) external;
    }

    interface IProxyFactory {
        function createProxyWithNonce(
            address _mastercopy,
            bytes initializer,
            uint256 saltNonce
        ) external returns (address proxy);
    }
}

/// `setup` calldata for a 1-of-1 Safe owned by `owner`, with no delegate
/// call, fallback handler, or deployment payment.
pub fn single_owner_setup(owner: Address) -> Bytes {
    IGnosisSafe::setupCall {
        _owners: vec![owner],
        _threshold: U256::from(1u8),
        to: Address::ZERO,
        data: Bytes::new(),
        fallbackHandler: Address::ZERO,
        paymentToken: Address::ZERO,
        payment: U256::ZERO,
        paymentReceiver: Address::ZERO,
    }
    .abi_encode()
    .into()
}

/// `createProxyWithNonce` calldata for the proxy factory.
pub fn create_proxy_with_nonce(master_copy: Address, initializer: Bytes, salt_nonce: U256) -> Bytes {
    IProxyFactory::createProxyWithNonceCall {
        _mastercopy: master_copy,
        initializer,
        saltNonce: salt_nonce,
    }
    .abi_encode()
    .into()
}

/// CREATE2 address the factory assigns, computed offline.
///
/// Mirrors `ProxyFactory.createProxyWithNonce`: the CREATE2 salt is
/// `keccak256(keccak256(initializer) ‖ saltNonce)` and the init code is the
/// proxy creation code followed by the master copy as a constructor argument.
/// `proxy_creation_code` is what the factory's `proxyCreationCode()` returns.
pub fn create2_address(
    factory: Address,
    proxy_creation_code: &[u8],
    master_copy: Address,
    initializer: &[u8],
    salt_nonce: U256,
) -> Address {
    let salt = keccak256((keccak256(initializer), salt_nonce).abi_encode_packed());

    let mut init_code = proxy_creation_code.to_vec();
    init_code.extend_from_slice(&master_copy.abi_encode());

    factory.create2(salt, keccak256(&init_code))
}
