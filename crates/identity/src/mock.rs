//! Mock identity service
//!
//! Issues numbered token pairs and records every call for test assertions.
//! Refresh tokens marked revoked are rejected the way the provider would.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::{IdentityError, IdentityService, IdentityUser, SessionTokens};

pub const MOCK_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

#[derive(Debug, Default)]
struct Recorded {
    refresh_tokens: Vec<String>,
    password_updates: Vec<String>,
    revoked: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MockIdentityService {
    state: Arc<Mutex<Recorded>>,
}

impl MockIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh tokens received, in call order
    pub fn refresh_tokens(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.refresh_tokens.clone())
            .unwrap_or_default()
    }

    /// Access tokens that requested a password change, in call order
    pub fn password_updates(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.password_updates.clone())
            .unwrap_or_default()
    }

    pub fn revoke(&self, refresh_token: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.revoked.insert(refresh_token.to_string());
        }
    }
}

#[async_trait::async_trait]
impl IdentityService for MockIdentityService {
    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, IdentityError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| IdentityError::Request(format!("mock state lock poisoned: {e}")))?;

        state.refresh_tokens.push(refresh_token.to_string());

        if state.revoked.contains(refresh_token) {
            return Err(IdentityError::Rejected {
                status: 400,
                message: "Invalid Refresh Token: Already Used".to_string(),
            });
        }

        let n = state.refresh_tokens.len();
        tracing::debug!(n, "Mock identity: issuing session");

        Ok(SessionTokens {
            access_token: format!("mock-access-{}", n),
            refresh_token: format!("mock-refresh-{}", n),
            token_type: "bearer".to_string(),
            expires_in: 3600,
        })
    }

    async fn update_password(
        &self,
        access_token: &str,
        _password: &str,
    ) -> Result<IdentityUser, IdentityError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| IdentityError::Request(format!("mock state lock poisoned: {e}")))?;

        state.password_updates.push(access_token.to_string());

        Ok(IdentityUser {
            id: MOCK_USER_ID.to_string(),
            email: None,
        })
    }
}
