// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Digest signing with the administrative key.
//!
//! Signatures are emitted in the RPC convention the relay service expects:
//! `r ‖ s ‖ v` as 65 bytes of `0x`-prefixed hex, with `v` offset to 27/28.

use std::fmt;

use alloy::{
    primitives::{Address, Signature, B256},
    signers::{local::PrivateKeySigner, SignerSync},
};
use serde::{Serialize, Serializer};

/// Offset added to the recovery id in RPC-encoded signatures.
const RECOVERY_ID_OFFSET: u8 = 27;

/// Errors raised while loading the key or signing.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    Signature(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

/// The relayer's administrative signer.
///
/// The key is read-only after construction and never printed; `Debug` only
/// shows the derived address.
#[derive(Clone)]
pub struct AdminSigner {
    inner: PrivateKeySigner,
}

impl AdminSigner {
    /// Load a signer from a hex-encoded secp256k1 key, with or without `0x`.
    pub fn from_hex(private_key_hex: &str) -> Result<Self, SigningError> {
        let trimmed = private_key_hex.trim();
        let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let key_bytes = alloy::hex::decode(hex)
            .map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        if key_bytes.len() != 32 {
            return Err(SigningError::InvalidKey(format!(
                "expected 32 bytes, got {}",
                key_bytes.len()
            )));
        }

        let inner = PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| SigningError::InvalidKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Address derived from the key.
    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// Sign a 32-byte digest (no EIP-191 prefix is applied).
    pub fn sign(&self, digest: &B256) -> Result<RpcSignature, SigningError> {
        let signature = self
            .inner
            .sign_hash_sync(digest)
            .map_err(|e| SigningError::Signature(e.to_string()))?;
        Ok(RpcSignature::from(signature))
    }
}

impl fmt::Debug for AdminSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSigner")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// ECDSA signature in `r ‖ s ‖ v` form with `v ∈ {27, 28}`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RpcSignature([u8; 65]);

impl RpcSignature {
    pub fn r(&self) -> B256 {
        B256::from_slice(&self.0[..32])
    }

    pub fn s(&self) -> B256 {
        B256::from_slice(&self.0[32..64])
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// `0x`-prefixed hex, as sent to the relay service.
    pub fn to_hex(&self) -> String {
        alloy::hex::encode_prefixed(self.0)
    }

    /// Parse an RPC signature; `v` may be 27/28 or 0/1.
    pub fn from_hex(raw: &str) -> Result<Self, SigningError> {
        let bytes = alloy::hex::decode(raw.trim())
            .map_err(|e| SigningError::InvalidSignature(e.to_string()))?;
        let signature = Signature::from_raw(&bytes)
            .map_err(|e| SigningError::InvalidSignature(e.to_string()))?;
        Ok(Self::from(signature))
    }

    /// Recover the signing address for `digest`.
    pub fn recover(&self, digest: &B256) -> Result<Address, SigningError> {
        Signature::from_raw(&self.0)
            .and_then(|signature| signature.recover_address_from_prehash(digest))
            .map_err(|e| SigningError::InvalidSignature(e.to_string()))
    }
}

impl From<Signature> for RpcSignature {
    fn from(signature: Signature) -> Self {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
        bytes[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
        bytes[64] = RECOVERY_ID_OFFSET + u8::from(signature.v());
        Self(bytes)
    }
}

impl fmt::Debug for RpcSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for RpcSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for RpcSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
