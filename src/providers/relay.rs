// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relay service client (Rockside-style API).
//!
//! All endpoints live under `{base}/ethereum/{network}` and authenticate with
//! an `apikey` query parameter. The client never retries: a submission that
//! fails after reaching the relay service may already have consumed a nonce,
//! so retry decisions belong to the caller.

use std::{collections::BTreeMap, str::FromStr};

use alloy::primitives::{Address, Bytes, U256};
use reqwest::{Client, Response};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

use crate::blockchain::{RpcSignature, FORWARD_SPEED};
use crate::config::RelayerConfig;

/// Payment channel used for every forward; the relayer uses one channel.
const CHANNEL_ID: &str = "0";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Relay service unavailable: {0}")]
    Unavailable(String),

    #[error("Relay service rejected submission ({status}): {body}")]
    Submission { status: u16, body: String },
}

/// Unsigned integer as reported by the relay service.
///
/// The relay may send numbers or strings (decimal or `0x` hex). The original
/// JSON form is kept so it is echoed back unmodified in submissions. Bare JSON
/// numbers must fit in a `u64`; wider values have to arrive as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    value: U256,
    raw: Value,
}

impl Quantity {
    pub fn value(&self) -> U256 {
        self.value
    }

    fn parse(raw: Value) -> Result<Self, String> {
        let value = match &raw {
            Value::Number(number) => number
                .as_u64()
                .map(U256::from)
                .ok_or_else(|| format!("{number} is not an unsigned integer"))?,
            Value::String(text) => {
                U256::from_str(text.trim()).map_err(|e| format!("{text:?}: {e}"))?
            }
            other => return Err(format!("expected number or string, got {other}")),
        };
        Ok(Self { value, raw })
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self {
            value: U256::from(value),
            raw: Value::from(value),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Quantity::parse(Value::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

/// Forwarding parameters for one signer account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardParams {
    /// Next forwarder nonce for the account
    pub nonce: Quantity,
    /// Gas price per speed tier
    #[serde(default)]
    pub gas_prices: BTreeMap<String, Quantity>,
}

impl ForwardParams {
    pub fn gas_price(&self, tier: &str) -> Option<&Quantity> {
        self.gas_prices.get(tier)
    }
}

/// A signed forward ready for submission.
pub struct SignedForward<'a> {
    pub signer: Address,
    pub to: Address,
    pub data: &'a Bytes,
    pub nonce: &'a Quantity,
    pub signature: &'a RpcSignature,
    pub gas_price_limit: &'a Quantity,
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: Url,
    network: String,
    api_key: String,
    forwarder: Address,
    http: Client,
}

impl RelayClient {
    pub fn new(config: &RelayerConfig) -> Result<Self, RelayError> {
        let http = Client::builder()
            .timeout(config.relay_timeout)
            .build()
            .map_err(|e| RelayError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.relay_api_url.clone(),
            network: config.network.clone(),
            api_key: config.relay_api_key.clone(),
            forwarder: config.forwarder,
            http,
        })
    }

    pub fn forwarder(&self) -> Address {
        self.forwarder
    }

    /// Fetch the current nonce and gas prices for `account`.
    pub async fn fetch_forward_params(&self, account: Address) -> Result<ForwardParams, RelayError> {
        let forwarder = self.forwarder.to_string();
        let url = self.endpoint(&["forwarders", &forwarder, "relayParams"])?;
        let payload = json!({
            "account": account,
            "channel_id": CHANNEL_ID,
        });

        let response = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::Unavailable(format!("forward params request failed: {e}")))?;

        let response = ensure_available(response, "forward params").await?;
        let params: ForwardParams = response
            .json()
            .await
            .map_err(|e| RelayError::Unavailable(format!("invalid forward params: {e}")))?;

        debug!(
            %account,
            nonce = %params.nonce.value(),
            tiers = params.gas_prices.len(),
            "Fetched forward params"
        );
        Ok(params)
    }

    /// Submit a signed forward at the `safelow` tier.
    pub async fn submit_forward(&self, forward: SignedForward<'_>) -> Result<String, RelayError> {
        let forwarder = self.forwarder.to_string();
        let url = self.endpoint(&["forwarders", &forwarder])?;
        let payload = json!({
            "message": {
                "signer": forward.signer,
                "to": forward.to,
                "data": forward.data,
                "nonce": forward.nonce,
            },
            "signature": forward.signature,
            "speed": FORWARD_SPEED,
            "gas_price_limit": forward.gas_price_limit,
        });

        let tracking_id = self.submit(url, &payload).await?;
        info!(
            signer = %forward.signer,
            to = %forward.to,
            nonce = %forward.nonce.value(),
            %tracking_id,
            "Forward submitted"
        );
        Ok(tracking_id)
    }

    /// Fetch relay parameters for a user-pays-gas target (passthrough).
    pub async fn fetch_relay_params(&self, target: &str) -> Result<Value, RelayError> {
        let url = self.endpoint(&["relay", target, "params"])?;
        self.get_json(url, "relay params").await
    }

    /// Submit a user-pays-gas relay to `destination`.
    pub async fn submit_relay(
        &self,
        destination: Address,
        data: &Bytes,
        speed: &str,
    ) -> Result<String, RelayError> {
        let destination_segment = destination.to_string();
        let url = self.endpoint(&["relay", &destination_segment])?;
        let payload = json!({
            "data": data,
            "speed": speed,
        });

        let tracking_id = self.submit(url, &payload).await?;
        info!(%destination, speed, %tracking_id, "Relay submitted");
        Ok(tracking_id)
    }

    /// Status of a previously submitted transaction (passthrough).
    pub async fn get_status(&self, tracking_id: &str) -> Result<Value, RelayError> {
        let url = self.endpoint(&["transactions", tracking_id])?;
        self.get_json(url, "transaction status").await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RelayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RelayError::Unavailable(format!("relay URL {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["ethereum", self.network.as_str()])
            .extend(segments);
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        Ok(url)
    }

    async fn get_json(&self, url: Url, what: &str) -> Result<Value, RelayError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::Unavailable(format!("{what} request failed: {e}")))?;

        ensure_available(response, what)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::Unavailable(format!("{what} returned invalid JSON: {e}")))
    }

    async fn submit(&self, url: Url, payload: &Value) -> Result<String, RelayError> {
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::Unavailable(format!("submission request failed: {e}")))?;

        let status = response.status();
        let body = read_body(response, "submission").await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), body = %body, "Relay rejected submission");
            return Err(RelayError::Submission {
                status: status.as_u16(),
                body,
            });
        }

        extract_tracking_id(&body).ok_or(RelayError::Submission {
            status: status.as_u16(),
            body,
        })
    }
}

async fn ensure_available(response: Response, what: &str) -> Result<Response, RelayError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = read_body(response, what).await?;
    Err(RelayError::Unavailable(format!("{what} returned {status}: {body}")))
}

async fn read_body(response: Response, what: &str) -> Result<String, RelayError> {
    response
        .text()
        .await
        .map_err(|e| RelayError::Unavailable(format!("{what} body could not be read: {e}")))
}

fn extract_tracking_id(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("tracking_id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
