//! Service token authentication for protected routes
//!
//! Every protected route runs the same check: the deployment's own
//! token must be usable (non-empty, not a known placeholder), and the
//! caller's `x-service-token` header must match it exactly. The
//! usability of the configured token is re-checked on every call, not
//! only at startup.

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

use super::error::ApiError;
use crate::config::AuthConfig;

/// Header carrying the caller's credential
pub const SERVICE_TOKEN_HEADER: &str = "x-service-token";

/// Resolved authentication state shared by all protected routes
#[derive(Debug)]
pub struct ServiceAuth {
    service_token: Option<String>,
    placeholder_tokens: Vec<String>,
}

impl ServiceAuth {
    /// Create from explicit parts. The placeholder denylist is injected
    /// rather than hardcoded at the comparison site so tests can
    /// override it.
    #[must_use]
    pub fn new(service_token: Option<String>, placeholder_tokens: Vec<String>) -> Self {
        Self {
            service_token,
            placeholder_tokens,
        }
    }

    /// Create resolved auth state from `AuthConfig`
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.resolve_service_token(),
            config.placeholder_tokens.clone(),
        )
    }

    /// Whether the configured token is usable for serving protected routes
    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self.service_token.as_deref() {
            None | Some("") => false,
            Some(token) => !self.placeholder_tokens.iter().any(|p| p == token),
        }
    }

    /// Authorize one request credential against the configured token.
    ///
    /// Fails with [`ApiError::MisconfiguredService`] when the deployment
    /// itself is invalid, independent of the caller, and with
    /// [`ApiError::Unauthorized`] on credential mismatch.
    pub fn authorize(&self, credential: &str) -> Result<(), ApiError> {
        if !self.is_configured() {
            return Err(ApiError::MisconfiguredService);
        }
        let token = self.service_token.as_deref().unwrap_or("");

        // Constant-time comparison to prevent timing side-channels
        if credential.as_bytes().ct_eq(token.as_bytes()).into() {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

/// Extract the caller's credential from request headers.
/// A missing or non-UTF-8 header reads as the empty credential.
#[must_use]
pub fn credential_from_headers(headers: &HeaderMap) -> &str {
    headers
        .get(SERVICE_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
