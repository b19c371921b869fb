//! HTTP error mapping.
//!
//! Every handler failure funnels through [`ApiError`], so each accepted
//! request gets exactly one reply and upstream failures never leak internal
//! detail to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

/// JSON error payload returned to callers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request rejected at the ingress, before any adapter dispatch.
    #[error("{0}")]
    Validation(&'static str),
    /// External call failed. Callers get the generic public message; the
    /// full error chain is logged server-side only.
    #[error("{public}")]
    Upstream {
        public: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    pub fn upstream(public: &'static str, cause: anyhow::Error) -> Self {
        Self::Upstream { public, cause }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, *msg),
            ApiError::Upstream { public, cause } => {
                error!("upstream call failed: {:#}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, *public)
            }
        };

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
