//! Session endpoints
//!
//! - GET /v1/auth/session - Describe the caller's access token
//! - POST /v1/auth/refresh - Exchange the `refresh-token` header for a new session
//! - POST /v1/auth/reset_password - Set a new password for the caller

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use storefront_auth::{AccessToken, AuthConfig, AuthError, Claims, RefreshToken, VerifiedAccess};
use storefront_common::ValidatedJson;
use storefront_identity::{IdentityError, IdentityService, IdentityUser, SessionTokens};
use validator::Validate;

/// State for the session routes
#[derive(Clone)]
pub struct SessionState {
    pub auth_config: AuthConfig,
    pub identity: Arc<dyn IdentityService>,
}

impl FromRef<SessionState> for AuthConfig {
    fn from_ref(state: &SessionState) -> Self {
        state.auth_config.clone()
    }
}

/// Verified claims plus the remaining lifetime
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub claims: Claims,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6, max = 72))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordResponse {
    pub user: IdentityUser,
}

/// Session route failure
#[derive(Debug)]
pub enum SessionError {
    Auth(AuthError),
    Identity(IdentityError),
}

impl From<AuthError> for SessionError {
    fn from(error: AuthError) -> Self {
        SessionError::Auth(error)
    }
}

impl From<IdentityError> for SessionError {
    fn from(error: IdentityError) -> Self {
        SessionError::Identity(error)
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let error = match self {
            SessionError::Auth(e) => return e.into_response(),
            SessionError::Identity(e) => e,
        };

        let (status, code, message) = match error {
            IdentityError::Rejected { status, message } => {
                tracing::debug!(status, message = %message, "Identity provider rejected request");
                let status = if status == StatusCode::UNPROCESSABLE_ENTITY.as_u16() {
                    StatusCode::UNPROCESSABLE_ENTITY
                } else {
                    StatusCode::UNAUTHORIZED
                };
                (status, "IDENTITY_REJECTED", message)
            }
            IdentityError::Configuration(reason) => {
                tracing::error!(reason = %reason, "Identity provider misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IDENTITY_CONFIGURATION_ERROR",
                    "Identity provider is not configured".to_string(),
                )
            }
            IdentityError::Request(reason) | IdentityError::Response(reason) => {
                tracing::error!(reason = %reason, "Identity provider call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "IDENTITY_PROVIDER_ERROR",
                    "Identity provider request failed".to_string(),
                )
            }
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

/// GET /v1/auth/session - Describe the caller's access token
pub async fn session(VerifiedAccess { claims, .. }: VerifiedAccess) -> Json<SessionResponse> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;

    Json(SessionResponse {
        expires_in: claims.expires_in(now),
        claims,
    })
}

/// POST /v1/auth/refresh - Exchange a refresh token for a new session
///
/// The token is forwarded as received; the identity provider decides
/// whether it is still good.
pub async fn refresh(
    State(state): State<SessionState>,
    RefreshToken(refresh_token): RefreshToken,
) -> Result<Json<SessionTokens>, SessionError> {
    let tokens = state.identity.refresh_session(&refresh_token).await?;
    Ok(Json(tokens))
}

/// POST /v1/auth/reset_password - Set a new password for the caller
pub async fn reset_password(
    AccessToken(access_token): AccessToken,
    State(state): State<SessionState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<ResetPasswordResponse>, SessionError> {
    let user = state
        .identity
        .update_password(&access_token, &request.password)
        .await?;

    tracing::info!(user_id = %user.id, "Password reset");

    Ok(Json(ResetPasswordResponse { user }))
}

/// Create session routes
pub fn routes() -> Router<SessionState> {
    Router::new()
        .route("/v1/auth/session", get(session))
        .route("/v1/auth/refresh", post(refresh))
        .route("/v1/auth/reset_password", post(reset_password))
}
