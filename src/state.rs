// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::relayer::Relayer;

#[derive(Clone)]
pub struct AppState {
    pub relayer: Arc<Relayer>,
}

impl AppState {
    pub fn new(relayer: Relayer) -> Self {
        Self {
            relayer: Arc::new(relayer),
        }
    }
}
