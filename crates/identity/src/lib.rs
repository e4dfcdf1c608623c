//! Storefront identity provider integration
//!
//! The hosted identity provider issues the access and refresh tokens that
//! the API verifies. This crate talks to it for the two operations the API
//! forwards on the caller's behalf:
//! - exchanging a refresh token for a new session
//! - updating the signed-in user's password
//!
//! A mock implementation records calls for tests and local development.

pub mod client;
pub mod mock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity provider configuration error: {0}")]
    Configuration(String),

    #[error("Identity provider request error: {0}")]
    Request(String),

    /// The provider answered with a client error (bad or revoked token,
    /// weak password, ...). The message is the provider's own.
    #[error("Identity provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Identity provider response error: {0}")]
    Response(String),
}

/// Fresh token pair returned by a session refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Identity provider view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Identity provider configuration.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Provider implementation (supabase, mock)
    pub provider: String,
    /// Project URL of the hosted provider
    pub base_url: String,
    /// Public API key sent as `apikey`
    pub api_key: String,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl IdentityConfig {
    /// Load from `IDENTITY_PROVIDER`, `IDENTITY_URL` and `IDENTITY_API_KEY`
    pub fn from_env() -> Result<Self, IdentityError> {
        let provider = std::env::var("IDENTITY_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let base_url = std::env::var("IDENTITY_URL").unwrap_or_default();
        let api_key = std::env::var("IDENTITY_API_KEY").unwrap_or_default();

        let config = Self {
            provider,
            base_url,
            api_key,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn mock() -> Self {
        Self {
            provider: "mock".to_string(),
            base_url: String::new(),
            api_key: String::new(),
        }
    }

    fn validate(&self) -> Result<(), IdentityError> {
        if self.provider == "supabase" {
            if self.base_url.is_empty() {
                return Err(IdentityError::Configuration(
                    "IDENTITY_URL is required for the supabase provider".to_string(),
                ));
            }
            if self.api_key.is_empty() {
                return Err(IdentityError::Configuration(
                    "IDENTITY_API_KEY is required for the supabase provider".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Operations forwarded to the identity provider.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Exchange a refresh token for a new session. The token is sent as
    /// received; only the provider can tell whether it is still valid.
    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, IdentityError>;

    /// Set a new password for the user the access token belongs to.
    async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityError>;
}

/// Factory for creating IdentityService implementations.
pub struct IdentityServiceFactory;

impl IdentityServiceFactory {
    pub fn create(config: IdentityConfig) -> Result<Box<dyn IdentityService>, IdentityError> {
        config.validate()?;

        match config.provider.as_str() {
            "supabase" => {
                tracing::info!(base_url = %config.base_url, "Creating hosted identity client");
                Ok(Box::new(client::SupabaseIdentityClient::new(&config)?))
            }
            "mock" => {
                tracing::info!("Creating mock identity service");
                Ok(Box::new(mock::MockIdentityService::new()))
            }
            provider => Err(IdentityError::Configuration(format!(
                "Unknown identity provider: {}. Supported providers: supabase, mock",
                provider
            ))),
        }
    }
}
