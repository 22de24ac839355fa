// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! EVM-side building blocks for meta-transactions.
//!
//! This module provides functionality for:
//! - EIP-712 digests of forwarder messages
//! - Signing digests with the administrative key
//! - Gnosis Safe proxy calldata and salt nonces
//! - Predicting proxy addresses with a read-only call

pub mod client;
pub mod eip712;
pub mod safe;
pub mod salt;
pub mod signing;
pub mod types;

pub use client::{ChainClient, PredictionError};
pub use eip712::{hash_tx_message, TxMessage};
pub use salt::{RandomSalt, SaltSource};
pub use signing::{AdminSigner, RpcSignature, SigningError};
pub use types::*;
