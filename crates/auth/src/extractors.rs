//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthConfig: FromRef<S>`, so the
//! configuration reaches the decoder explicitly on every request.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwt::{decode_jwt, extract_bearer_token};

/// Header carrying the refresh token
pub const REFRESH_TOKEN_HEADER: &str = "refresh-token";

/// Verified access token.
///
/// Holds the raw bearer credential exactly as presented, not its claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

/// Verified access token together with its decoded claims.
///
/// For handlers that read the claims; the token is decoded once.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedAccess {
    pub token: String,
    pub claims: Claims,
}

fn verify_bearer(parts: &Parts, config: &AuthConfig) -> Result<VerifiedAccess, AuthError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?;

    let token = extract_bearer_token(auth_header)?;
    let claims = decode_jwt(&token, config).map_err(AuthError::from)?;

    Ok(VerifiedAccess { token, claims })
}

impl<S> FromRequestParts<S> for AccessToken
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        let verified = verify_bearer(parts, &config)?;
        Ok(AccessToken(verified.token))
    }
}

impl<S> FromRequestParts<S> for VerifiedAccess
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        verify_bearer(parts, &config)
    }
}

/// Refresh token taken verbatim from the `refresh-token` header.
///
/// No signature or expiry check happens here; verification is left to the
/// identity provider that consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken(pub String);

impl<S> FromRequestParts<S> for RefreshToken
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(REFRESH_TOKEN_HEADER)
            .ok_or(AuthError::MissingRefreshToken)?;

        let token = header
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

        if token.is_empty() {
            return Err(AuthError::MissingRefreshToken);
        }

        Ok(RefreshToken(token.to_string()))
    }
}
