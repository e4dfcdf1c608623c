//! Authentication errors
//!
//! Two layers: [`DecodeError`] is what the token decoder returns, and
//! [`AuthError`] is the request rejection produced by the extractors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Token decoder failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Deployment misconfiguration (missing secret, unusable algorithm).
    /// Not a per-request condition.
    #[error("authentication misconfigured: {0}")]
    Configuration(String),

    /// Bad signature, expired, wrong audience, malformed or missing claims.
    /// The cause text is kept for logs and the rejection message only.
    #[error("{cause}")]
    InvalidToken { cause: String },
}

impl DecodeError {
    pub(crate) fn invalid(cause: impl ToString) -> Self {
        DecodeError::InvalidToken {
            cause: cause.to_string(),
        }
    }
}

/// Authentication rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    MissingRefreshToken,
    InvalidToken(String),
    /// Decoder reported a configuration error
    Misconfigured,
}

impl From<DecodeError> for AuthError {
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::InvalidToken { cause } => AuthError::InvalidToken(cause),
            DecodeError::Configuration(reason) => {
                tracing::error!(reason = %reason, "Token decoder hit a configuration error");
                AuthError::Misconfigured
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authorization header required".to_string(),
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format".to_string(),
            ),
            AuthError::MissingRefreshToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_REFRESH_TOKEN",
                "refresh-token header required".to_string(),
            ),
            AuthError::InvalidToken(cause) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                format!("Invalid token: {}", cause),
            ),
            AuthError::Misconfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_CONFIGURATION_ERROR",
                "Authentication is not configured".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
