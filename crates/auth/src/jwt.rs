//! JWT decoding and bearer token extraction

use axum::http::HeaderValue;
use jsonwebtoken::{decode, errors::ErrorKind, get_current_timestamp, DecodingKey, Validation};

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::{AuthError, DecodeError};

/// Decode and verify an access token.
///
/// Checks the signature against the configured secret and algorithm, the
/// `aud` claim against the configured audience, and expiry with no leeway
/// (`now >= exp` is expired). Every verification failure comes back as
/// [`DecodeError::InvalidToken`]; a missing secret or unusable algorithm
/// is a [`DecodeError::Configuration`] raised before any crypto runs.
pub fn decode_jwt(token: &str, config: &AuthConfig) -> Result<Claims, DecodeError> {
    let secret = config.secret()?;
    let algorithm = config.signing_algorithm()?;

    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    validation.set_audience(&[&config.audience]);
    validation.set_required_spec_claims(&["exp", "aud"]);

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        DecodeError::invalid(e)
    })?;

    let claims = token_data.claims;

    // The library only rejects `exp < now`
    if get_current_timestamp() >= claims.exp {
        tracing::debug!(exp = claims.exp, "JWT expired at boundary");
        return Err(DecodeError::invalid(jsonwebtoken::errors::Error::from(
            ErrorKind::ExpiredSignature,
        )));
    }

    Ok(claims)
}

/// Extract the credential from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively and the value is split at the
/// first space.
pub fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    let (scheme, credentials) = header_str
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthorizationFormat)?;

    if !scheme.eq_ignore_ascii_case("bearer") || credentials.is_empty() {
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    Ok(credentials.to_string())
}
