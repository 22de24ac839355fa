// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{
    api::extract::ApiJson,
    error::ApiError,
    models::{DeployRequest, DeployResponse},
    state::AppState,
};

/// Deploy a Safe proxy for `owner`; the admin pays gas.
///
/// The returned `proxyAddress` is predicted before submission and is where
/// the proxy will live once the forwarded deployment is mined.
#[utoipa::path(
    post,
    path = "/deploy",
    request_body = DeployRequest,
    tag = "Wallet",
    responses(
        (status = 200, description = "Deployment forwarded", body = DeployResponse),
        (status = 500, description = "Malformed body, prediction, signing, or relay failure")
    )
)]
pub async fn deploy_wallet(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<DeployRequest>,
) -> Result<Json<DeployResponse>, ApiError> {
    let deployment = state.relayer.deploy_wallet(request.owner).await?;
    Ok(Json(deployment.into()))
}
