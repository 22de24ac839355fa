// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Transaction Composer
//!
//! Runs the three supported intents on top of the hasher, signer, relay
//! client, and address predictor:
//!
//! - **Deploy wallet** (admin pays): forward a `createProxyWithNonce` call to
//!   the Safe proxy factory and return the predicted proxy address.
//! - **Forward** (admin pays): sign and forward an arbitrary call.
//! - **Relay** (user pays): hand the call straight to the relay service.
//!
//! The relayer holds no mutable state. Every admin-paid flow fetches a fresh
//! nonce right before signing; nonces are never cached or reused, so nonce
//! ordering across concurrent requests is up to the relay service.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes};
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    blockchain::{
        hash_tx_message, safe, salt::render_salt, AdminSigner, ChainClient, PredictionError,
        RandomSalt, SaltSource, SigningError, TxMessage, FORWARD_SPEED,
    },
    config::RelayerConfig,
    providers::relay::{ForwardParams, RelayClient, RelayError, SignedForward},
};

/// Errors from any step of a relayer flow.
#[derive(Debug, thiserror::Error)]
pub enum RelayerError {
    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Result of a wallet deployment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub tracking_id: String,
    pub proxy_address: Address,
}

pub struct Relayer {
    config: Arc<RelayerConfig>,
    signer: AdminSigner,
    relay: RelayClient,
    chain: ChainClient,
    salts: Arc<dyn SaltSource>,
}

impl Relayer {
    pub fn new(
        config: Arc<RelayerConfig>,
        signer: AdminSigner,
        relay: RelayClient,
        chain: ChainClient,
        salts: Arc<dyn SaltSource>,
    ) -> Self {
        Self {
            config,
            signer,
            relay,
            chain,
            salts,
        }
    }

    /// Build every component from configuration, with an OS-seeded salt source.
    pub fn from_config(config: RelayerConfig) -> Result<Self, RelayerError> {
        let signer = AdminSigner::from_hex(config.admin_private_key.expose())?;
        let relay = RelayClient::new(&config)?;
        let chain = ChainClient::new(config.rpc_url.as_str(), config.rpc_timeout)?;
        Ok(Self::new(
            Arc::new(config),
            signer,
            relay,
            chain,
            Arc::new(RandomSalt::from_os_rng()),
        ))
    }

    pub fn config(&self) -> &RelayerConfig {
        &self.config
    }

    /// Address of the administrative signer.
    pub fn admin(&self) -> Address {
        self.signer.address()
    }

    /// Deploy a 1-of-1 Safe proxy for `owner`, paid by the admin.
    ///
    /// If the proxy address cannot be predicted, nothing is submitted.
    #[instrument(skip(self), fields(admin = %self.admin()))]
    pub async fn deploy_wallet(&self, owner: Address) -> Result<Deployment, RelayerError> {
        let initializer = safe::single_owner_setup(owner);
        let salt = self.salts.next_salt();
        let factory = self.config.proxy_factory;
        let factory_data =
            safe::create_proxy_with_nonce(self.config.safe_master_copy, initializer, salt);

        let params = self.relay.fetch_forward_params(self.admin()).await?;
        let proxy_address = self.chain.predict_address(factory, &factory_data).await?;
        let tracking_id = self.sign_and_forward(factory, factory_data, &params).await?;

        info!(
            %owner,
            %proxy_address,
            salt = %render_salt(salt),
            %tracking_id,
            "Safe deployment forwarded"
        );
        Ok(Deployment {
            tracking_id,
            proxy_address,
        })
    }

    /// Forward `data` to `to` under the admin's signature; the admin pays gas.
    #[instrument(skip(self, data), fields(admin = %self.admin(), data_len = data.len()))]
    pub async fn forward(&self, to: Address, data: Bytes) -> Result<String, RelayerError> {
        let params = self.relay.fetch_forward_params(self.admin()).await?;
        self.sign_and_forward(to, data, &params).await
    }

    /// Relay `data` to `to`; the end user pays gas, so nothing is signed here.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub async fn relay(&self, to: Address, data: Bytes, speed: &str) -> Result<String, RelayerError> {
        Ok(self.relay.submit_relay(to, &data, speed).await?)
    }

    /// Relay service parameters for a user-pays-gas target.
    pub async fn relay_params(&self, target: &str) -> Result<Value, RelayerError> {
        Ok(self.relay.fetch_relay_params(target).await?)
    }

    /// Status of a previously returned tracking id.
    pub async fn status(&self, tracking_id: &str) -> Result<Value, RelayerError> {
        Ok(self.relay.get_status(tracking_id).await?)
    }

    async fn sign_and_forward(
        &self,
        to: Address,
        data: Bytes,
        params: &ForwardParams,
    ) -> Result<String, RelayerError> {
        let gas_price_limit = params.gas_price(FORWARD_SPEED).ok_or_else(|| {
            RelayError::Unavailable(format!(
                "forward params have no `{FORWARD_SPEED}` gas price"
            ))
        })?;

        let message = TxMessage::new(self.admin(), to, data, params.nonce.value());
        let digest = hash_tx_message(&self.config.domain(), &message);
        let signature = self.signer.sign(&digest)?;

        let tracking_id = self
            .relay
            .submit_forward(SignedForward {
                signer: message.signer,
                to: message.to,
                data: &message.data,
                nonce: &params.nonce,
                signature: &signature,
                gas_price_limit,
            })
            .await?;
        Ok(tracking_id)
    }
}
