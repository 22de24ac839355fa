// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. Response fields are
//! camelCase (`trackingId`, `proxyAddress`); addresses and calldata are
//! `0x`-prefixed hex strings.

use alloy::primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::relayer::Deployment;

// =============================================================================
// Requests
// =============================================================================

/// Deploy a Safe proxy for a single owner.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeployRequest {
    /// Owner of the new Safe
    #[schema(value_type = String, example = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA")]
    pub owner: Address,
}

/// Forward a call; the admin pays gas.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ForwardRequest {
    /// Contract to call
    #[schema(value_type = String)]
    pub to: Address,
    /// ABI-encoded calldata
    #[schema(value_type = String, example = "0x")]
    pub data: Bytes,
}

/// Relay a call; the end user pays gas.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RelayRequest {
    /// Relay destination (typically the user's Safe)
    #[schema(value_type = String)]
    pub to: Address,
    /// Signed payload for the destination
    #[schema(value_type = String)]
    pub data: Bytes,
    /// Gas-price tier (e.g. `safelow`, `average`, `fast`, `fastest`)
    pub speed: String,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    /// Relay service tracking id
    pub tracking_id: String,
    /// Address the proxy will be deployed at
    #[schema(value_type = String)]
    pub proxy_address: Address,
}

impl From<Deployment> for DeployResponse {
    fn from(deployment: Deployment) -> Self {
        Self {
            tracking_id: deployment.tracking_id,
            proxy_address: deployment.proxy_address,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    /// Relay service tracking id
    pub tracking_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use serde_json::json;

    #[test]
    fn responses_use_camel_case() {
        let response = DeployResponse::from(Deployment {
            tracking_id: "abc".into(),
            proxy_address: address!("0x1111111111111111111111111111111111111111"),
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "trackingId": "abc",
                "proxyAddress": "0x1111111111111111111111111111111111111111"
            })
        );
        assert_eq!(
            serde_json::to_value(TrackingResponse { tracking_id: "x".into() }).unwrap(),
            json!({ "trackingId": "x" })
        );
    }

    #[test]
    fn requests_parse_hex_fields() {
        let request: ForwardRequest = serde_json::from_value(json!({
            "to": "0x2222222222222222222222222222222222222222",
            "data": "0xa9059cbb"
        }))
        .unwrap();
        assert_eq!(&request.data[..], &[0xa9u8, 0x05, 0x9c, 0xbb]);

        assert!(serde_json::from_value::<DeployRequest>(json!({ "owner": "0x12" })).is_err());
    }
}
