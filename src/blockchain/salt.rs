// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Salt nonces for deterministic proxy deployment.
//!
//! Salts only need to be unlikely to collide for the same factory; they keep
//! two deployments for the same owner from landing on the same address.

use std::sync::{Mutex, PoisonError};

use alloy::primitives::U256;
use rand::{rngs::StdRng, RngCore, SeedableRng};

/// Source of 256-bit salt nonces.
pub trait SaltSource: Send + Sync {
    fn next_salt(&self) -> U256;
}

/// Salt source backed by a seedable RNG.
#[derive(Debug)]
pub struct RandomSalt {
    rng: Mutex<StdRng>,
}

impl RandomSalt {
    /// Seeded from the operating system's entropy source.
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible source for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SaltSource for RandomSalt {
    fn next_salt(&self) -> U256 {
        let mut bytes = [0u8; 32];
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(&mut bytes);
        U256::from_be_bytes(bytes)
    }
}

/// Render a salt as a `0x`-prefixed hex integer.
pub fn render_salt(salt: U256) -> String {
    format!("0x{salt:x}")
}
