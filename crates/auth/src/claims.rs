//! JWT claims types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims carried by an access token issued by the identity provider.
///
/// Only `aud`, `exp` and `iat` are required; every other claim in the
/// payload is kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Audience
    pub aud: String,
    /// Expires at (Unix seconds)
    pub exp: u64,
    /// Issued at (Unix seconds)
    pub iat: u64,
    /// Remaining claims (`sub`, `email`, `role`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Look up a non-required claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Seconds left before expiry, zero once expired
    pub fn expires_in(&self, now: u64) -> u64 {
        self.exp.saturating_sub(now)
    }
}
