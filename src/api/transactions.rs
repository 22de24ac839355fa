// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Forward, relay, and tracking endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{
    api::extract::ApiJson,
    error::ApiError,
    models::{ForwardRequest, RelayRequest, TrackingResponse},
    state::AppState,
};

/// Forward a call signed by the admin; the admin pays gas.
#[utoipa::path(
    post,
    path = "/forward",
    request_body = ForwardRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Forward submitted", body = TrackingResponse),
        (status = 500, description = "Malformed body, signing, or relay failure")
    )
)]
pub async fn forward(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ForwardRequest>,
) -> Result<Json<TrackingResponse>, ApiError> {
    let tracking_id = state.relayer.forward(request.to, request.data).await?;
    Ok(Json(TrackingResponse { tracking_id }))
}

/// Relay a call; the end user pays gas.
#[utoipa::path(
    post,
    path = "/relay",
    request_body = RelayRequest,
    tag = "Transactions",
    responses(
        (status = 200, description = "Relay submitted", body = TrackingResponse),
        (status = 500, description = "Malformed body or relay failure")
    )
)]
pub async fn relay(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RelayRequest>,
) -> Result<Json<TrackingResponse>, ApiError> {
    let tracking_id = state
        .relayer
        .relay(request.to, request.data, &request.speed)
        .await?;
    Ok(Json(TrackingResponse { tracking_id }))
}

/// Relay parameters for a user-pays-gas target, as reported by the relay service.
#[utoipa::path(
    get,
    path = "/relay/{target}/params",
    tag = "Transactions",
    params(
        ("target" = String, Path, description = "Relay target address")
    ),
    responses(
        (status = 200, description = "Relay service response", body = Object),
        (status = 500, description = "Relay failure")
    )
)]
pub async fn relay_params(
    State(state): State<AppState>,
    Path(target): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.relayer.relay_params(&target).await?))
}

/// Status of a submitted transaction, as reported by the relay service.
#[utoipa::path(
    get,
    path = "/tx/{tracking_id}",
    tag = "Transactions",
    params(
        ("tracking_id" = String, Path, description = "Tracking id returned on submission")
    ),
    responses(
        (status = 200, description = "Relay service status", body = Object),
        (status = 500, description = "Relay failure")
    )
)]
pub async fn transaction_status(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.relayer.status(&tracking_id).await?))
}
