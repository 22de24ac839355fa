// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gasless Relayer - Meta-Transaction Relay Service
//!
//! Signs EIP-712 forward messages with an administrative key and submits
//! them through a third-party relay service, so end users never hold gas.
//! Also deploys 1-of-1 Gnosis Safe proxies and reports their address before
//! the deployment is mined.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - EIP-712 hashing, signing, salts, Safe calldata, address prediction
//! - `providers` - Relay service client
//! - `relayer` - Deploy, forward, and relay flows

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod relayer;
pub mod state;

#[cfg(test)]
mod testing;
