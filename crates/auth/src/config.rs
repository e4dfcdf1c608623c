//! Authentication configuration

use std::{env, fmt, str::FromStr};

use jsonwebtoken::Algorithm;

use crate::error::DecodeError;

/// Default signing algorithm of the hosted identity provider
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Audience the identity provider stamps on user access tokens
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Authentication configuration.
///
/// Read-only record handed to the decoder on every call. The secret is
/// optional here so that a missing secret surfaces as a configuration
/// error at decode time (and at startup via [`AuthConfig::validate`]).
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub algorithm: String,
    pub audience: String,
}

impl fmt::Debug for AuthConfig {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("audience", &self.audience)
            .finish()
    }
}

impl AuthConfig {
    /// Build a config with the default algorithm and audience
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Some(jwt_secret.into()),
            algorithm: DEFAULT_ALGORITHM.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    /// Load from `JWT_SECRET`, `JWT_ALGORITHM` and `JWT_AUDIENCE`
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET").ok(),
            algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| DEFAULT_ALGORITHM.to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string()),
        }
    }

    /// Startup check: fails with the same error the decoder would raise
    pub fn validate(&self) -> Result<(), DecodeError> {
        self.secret()?;
        self.signing_algorithm()?;
        Ok(())
    }

    pub(crate) fn secret(&self) -> Result<&str, DecodeError> {
        match self.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ => Err(DecodeError::Configuration(
                "JWT_SECRET must be set in the environment".to_string(),
            )),
        }
    }

    /// Only the HMAC family can verify against a shared secret
    pub(crate) fn signing_algorithm(&self) -> Result<Algorithm, DecodeError> {
        let algorithm = Algorithm::from_str(&self.algorithm).map_err(|_| {
            DecodeError::Configuration(format!("unknown JWT algorithm '{}'", self.algorithm))
        })?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            other => Err(DecodeError::Configuration(format!(
                "JWT algorithm {:?} is not a shared-secret algorithm",
                other
            ))),
        }
    }
}
