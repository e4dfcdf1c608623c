//! Hosted identity provider HTTP client
//!
//! Talks to the provider's auth API under `{base_url}/auth/v1`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{IdentityConfig, IdentityError, IdentityService, IdentityUser, SessionTokens};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SupabaseIdentityClient {
    http: reqwest::Client,
    auth_url: String,
    api_key: String,
}

impl SupabaseIdentityClient {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IdentityError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            auth_url: format!("{}/auth/v1", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        })
    }

    async fn read<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, IdentityError> {
        let status = response.status();

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(IdentityError::Response(format!(
                "Identity provider returned {}: {}",
                status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| IdentityError::Response(e.to_string()))
    }
}

/// Pull the human-readable message out of a provider error body
fn provider_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait::async_trait]
impl IdentityService for SupabaseIdentityClient {
    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, IdentityError> {
        let response = self
            .http
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.api_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let tokens = Self::read::<SessionTokens>(response).await?;
        tracing::debug!(expires_in = tokens.expires_in, "Session refreshed");
        Ok(tokens)
    }

    async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<IdentityUser, IdentityError> {
        let response = self
            .http
            .put(format!("{}/user", self.auth_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .json(&json!({ "password": password }))
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let user = Self::read::<IdentityUser>(response).await?;
        tracing::debug!(user_id = %user.id, "Password updated");
        Ok(user)
    }
}
