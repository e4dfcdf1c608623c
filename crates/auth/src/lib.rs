//! Authentication layer for the Storefront API
//!
//! Provides HS-family JWT decoding against an explicitly passed
//! [`AuthConfig`], plus axum extractors for the `Authorization: Bearer`
//! access token (raw, or with its claims) and the `refresh-token` header.
//! Extractors work with any router state `S` where `AuthConfig: FromRef<S>`.

mod claims;
mod config;
mod error;
mod extractors;
mod jwt;

pub use claims::Claims;
pub use config::AuthConfig;
pub use error::{AuthError, DecodeError};
pub use extractors::{AccessToken, RefreshToken, VerifiedAccess, REFRESH_TOKEN_HEADER};
pub use jwt::{decode_jwt, extract_bearer_token};
