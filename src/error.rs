// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::relayer::RelayerError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Every relayer failure surfaces as a 500 carrying the error's message.
impl From<RelayerError> for ApiError {
    fn from(err: RelayerError) -> Self {
        tracing::error!(error = %err, "Request failed");
        Self::internal(err.to_string())
    }
}

/// Unreadable or mistyped request bodies are reported like any other failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(
            status = %rejection.status(),
            error = %rejection.body_text(),
            "Rejected request body"
        );
        Self::internal(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::relay::RelayError;
    use axum::{body::to_bytes, extract::FromRequest};

    #[test]
    fn relayer_errors_map_to_internal() {
        let err = ApiError::from(RelayerError::Relay(RelayError::Submission {
            status: 400,
            body: "nonce too low".into(),
        }));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("nonce too low"));
    }

    #[tokio::test]
    async fn json_rejections_map_to_internal() {
        let request = axum::http::Request::builder()
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let rejection = axum::Json::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap_err();

        let err = ApiError::from(rejection);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::internal("relay down").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"relay down"}"#);
    }
}
