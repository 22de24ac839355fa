// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{DeployRequest, DeployResponse, ForwardRequest, RelayRequest, TrackingResponse},
    state::AppState,
};

pub mod extract;
pub mod health;
pub mod transactions;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/deploy", post(wallet::deploy_wallet))
        .route("/forward", post(transactions::forward))
        .route("/relay", post(transactions::relay))
        .route("/relay/{target}/params", get(transactions::relay_params))
        .route("/tx/{tracking_id}", get(transactions::transaction_status))
        .route("/health", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        wallet::deploy_wallet,
        transactions::forward,
        transactions::relay,
        transactions::relay_params,
        transactions::transaction_status,
        health::liveness
    ),
    components(
        schemas(
            DeployRequest,
            DeployResponse,
            ForwardRequest,
            RelayRequest,
            TrackingResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Wallet", description = "Safe proxy deployment"),
        (name = "Transactions", description = "Forwarded and relayed transactions"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mount_eth_call, test_relayer, TEST_FORWARDER};
    use alloy::primitives::address;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn app() -> (Router, MockServer, MockServer) {
        let relay = MockServer::start().await;
        let rpc = MockServer::start().await;
        let state = AppState::new(test_relayer(&relay, &rpc));
        (router(state), relay, rpc)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok_and_tags_request_id() {
        let (app, _relay, _rpc) = app().await;

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(json_body(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (app, _relay, _rpc) = app().await;

        let response = app
            .oneshot(Request::get("/api-doc/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        for route in ["/deploy", "/forward", "/relay", "/tx/{tracking_id}"] {
            assert!(doc["paths"].get(route).is_some(), "missing {route}");
        }
    }

    #[tokio::test]
    async fn relay_returns_camel_case_tracking_id() {
        let (app, relay, _rpc) = app().await;
        let destination = address!("0x3333333333333333333333333333333333333333");
        Mock::given(method("POST"))
            .and(path(format!("/ethereum/ropsten/relay/{destination}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracking_id": "trk-7" })))
            .expect(1)
            .mount(&relay)
            .await;

        let response = app
            .oneshot(post_json(
                "/relay",
                json!({ "to": destination, "data": "0xdeadbeef", "speed": "fast" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "trackingId": "trk-7" }));
    }

    #[tokio::test]
    async fn deploy_returns_predicted_proxy_address() {
        let (app, relay, rpc) = app().await;
        let predicted = address!("0x4444444444444444444444444444444444444444");
        mount_eth_call(&rpc, predicted).await;
        Mock::given(method("POST"))
            .and(path(format!(
                "/ethereum/ropsten/forwarders/{TEST_FORWARDER}/relayParams"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nonce": 0,
                "gas_prices": { "safelow": "1000000000" }
            })))
            .mount(&relay)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/ethereum/ropsten/forwarders/{TEST_FORWARDER}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracking_id": "trk-1" })))
            .expect(1)
            .mount(&relay)
            .await;

        let response = app
            .oneshot(post_json(
                "/deploy",
                json!({ "owner": "0xaAaAaAaaAaAaAaaAaAAAAAAAAaaaAaAaAaaAaaAa" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "trackingId": "trk-1", "proxyAddress": predicted })
        );
    }

    #[tokio::test]
    async fn relay_failure_is_internal_error() {
        let (app, relay, _rpc) = app().await;
        Mock::given(method("GET"))
            .and(path("/ethereum/ropsten/transactions/trk-9"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&relay)
            .await;

        let response = app
            .oneshot(Request::get("/tx/trk-9").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn malformed_body_is_internal_error_without_relaying() {
        let (app, relay, _rpc) = app().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&relay)
            .await;

        let bad_address = post_json("/forward", json!({ "to": "not-an-address", "data": "0x" }));
        let not_json = Request::builder()
            .method("POST")
            .uri("/deploy")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        for request in [bad_address, not_json] {
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = json_body(response).await;
            assert!(!body["error"].as_str().unwrap().is_empty());
        }
    }
}
