// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for unit tests: configuration pointing at mock servers
//! and a JSON-RPC responder for `eth_call`.

use std::sync::Arc;

use alloy::primitives::{address, Address};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

use crate::{
    blockchain::{AdminSigner, ChainClient, RandomSalt},
    config::RelayerConfig,
    providers::relay::RelayClient,
    relayer::Relayer,
};

// Well-known development key (first Hardhat/Anvil account).
pub const TEST_ADMIN_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADMIN: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const TEST_FORWARDER: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

pub fn test_config(relay_url: &str, rpc_url: &str) -> RelayerConfig {
    let vars = [
        ("ADMIN_PRIVATEKEY", TEST_ADMIN_KEY.to_string()),
        ("APIURL", relay_url.to_string()),
        ("APIKEY", "test-key".to_string()),
        ("FORWARDER", TEST_FORWARDER.to_string()),
        ("RPC", rpc_url.to_string()),
        ("RPC_TIMEOUT_SECS", "5".to_string()),
        ("RELAY_TIMEOUT_SECS", "5".to_string()),
    ];
    RelayerConfig::from_lookup(|name| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    })
    .expect("test config is valid")
}

pub fn test_relayer(relay: &MockServer, rpc: &MockServer) -> Relayer {
    let config = test_config(&relay.uri(), &rpc.uri());
    let signer = AdminSigner::from_hex(TEST_ADMIN_KEY).unwrap();
    let relay_client = RelayClient::new(&config).unwrap();
    let chain = ChainClient::new(config.rpc_url.as_str(), config.rpc_timeout).unwrap();
    Relayer::new(
        Arc::new(config),
        signer,
        relay_client,
        chain,
        Arc::new(RandomSalt::seeded(1)),
    )
}

/// Answers JSON-RPC requests with a fixed payload, echoing the request id.
struct JsonRpcResponder {
    payload: Value,
}

impl Respond for JsonRpcResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = serde_json::from_slice::<Value>(&request.body)
            .ok()
            .and_then(|body| body.get("id").cloned())
            .unwrap_or(Value::from(0));

        let mut body = json!({ "jsonrpc": "2.0", "id": id });
        if let (Some(body), Some(payload)) = (body.as_object_mut(), self.payload.as_object()) {
            body.extend(payload.clone());
        }
        ResponseTemplate::new(200).set_body_json(body)
    }
}

/// `eth_call` returns `address` as an ABI-encoded word.
pub async fn mount_eth_call(rpc: &MockServer, address: Address) {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "eth_call" })))
        .respond_with(JsonRpcResponder {
            payload: json!({ "result": alloy::hex::encode_prefixed(word) }),
        })
        .mount(rpc)
        .await;
}

/// `eth_call` fails with a JSON-RPC error.
pub async fn mount_eth_call_error(rpc: &MockServer, message: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "eth_call" })))
        .respond_with(JsonRpcResponder {
            payload: json!({ "error": { "code": 3, "message": message } }),
        })
        .mount(rpc)
        .await;
}
