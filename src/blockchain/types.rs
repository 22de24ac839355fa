// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use alloy::primitives::{address, Address};

/// Forwarder contract and chain a signature is valid for.
///
/// Built once from configuration and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwarderDomain {
    /// Forwarder contract that verifies the signature
    pub verifying_contract: Address,
    /// EIP-155 chain ID
    pub chain_id: u64,
}

/// Gnosis Safe proxy factory deployed on Ropsten.
pub const DEFAULT_PROXY_FACTORY: Address = address!("0x016457118b425fe86952381eC5127F28D4248984");

/// Gnosis Safe master copy deployed on Ropsten.
pub const DEFAULT_SAFE_MASTER_COPY: Address =
    address!("0xB6998f4E968573534D6ea6A500323B0d1cd03767");

/// Gas-price tier used for every admin-paid forward.
pub const FORWARD_SPEED: &str = "safelow";
