//! Per-request error taxonomy
//!
//! Each variant maps directly to one HTTP status with a short
//! machine-readable reason. No retries, no recovery.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The deployment's own token is unset, empty, or a placeholder.
    /// Operator error, not the caller's fault.
    #[error("service token is not configured")]
    MisconfiguredService,

    /// Caller supplied a wrong or missing credential
    #[error("invalid service token")]
    Unauthorized,

    /// Request body failed constraint validation
    #[error("{field}: {reason}")]
    Validation {
        /// Offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MisconfiguredService => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "service_misconfigured",
                    "message": "Service token not configured"
                })),
            )
                .into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unauthorized",
                    "message": "Invalid service token"
                })),
            )
                .into_response(),
            Self::Validation { field, reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "validation_failed",
                    "field": field,
                    "message": reason
                })),
            )
                .into_response(),
        }
    }
}
