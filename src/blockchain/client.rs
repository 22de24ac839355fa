// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only chain client used to predict proxy addresses.

use std::time::Duration;

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes},
    providers::{Provider, RootProvider},
    rpc::types::TransactionRequest,
};

/// Length of an address at the tail of the call return data.
const ADDRESS_LEN: usize = 20;

/// Chain client for `eth_call` against the proxy factory.
#[derive(Clone)]
pub struct ChainClient {
    provider: RootProvider<Ethereum>,
    timeout: Duration,
}

impl ChainClient {
    /// Create a client for the given RPC endpoint.
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, PredictionError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| PredictionError::InvalidRpcUrl(e.to_string()))?;

        Ok(Self {
            provider: RootProvider::new_http(url),
            timeout,
        })
    }

    /// Predict the address the factory will deploy for `init_data`.
    ///
    /// The factory call is executed with `eth_call`, so nothing is mined; the
    /// deployment function's return value is the would-be proxy address. The
    /// result must match the CREATE2 address a later mined deployment with the
    /// same factory, init data, and salt produces.
    pub async fn predict_address(
        &self,
        factory: Address,
        init_data: &Bytes,
    ) -> Result<Address, PredictionError> {
        let tx = TransactionRequest::default()
            .to(factory)
            .input(init_data.clone().into());

        let output = tokio::time::timeout(self.timeout, self.provider.call(tx))
            .await
            .map_err(|_| PredictionError::Timeout(self.timeout))?
            .map_err(|e| PredictionError::Rpc(e.to_string()))?;

        let address = trailing_address(&output)?;
        tracing::debug!(%factory, %address, "Predicted proxy address");
        Ok(address)
    }
}

/// Take the trailing 20 bytes of call return data as an address.
pub fn trailing_address(data: &[u8]) -> Result<Address, PredictionError> {
    if data.len() < ADDRESS_LEN {
        return Err(PredictionError::ShortReturnData(data.len()));
    }
    Ok(Address::from_slice(&data[data.len() - ADDRESS_LEN..]))
}

/// Errors that can occur while predicting a proxy address.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Address prediction call failed: {0}")]
    Rpc(String),

    #[error("Address prediction timed out after {0:?}")]
    Timeout(Duration),

    #[error("Address prediction returned {0} bytes, expected at least 20")]
    ShortReturnData(usize),
}
