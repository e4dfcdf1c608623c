//! Shared configuration, error handling and extractors for Storefront
//!
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP rendering
//! - Request extractors that reject with the same JSON error envelope

pub mod config;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidPath, ValidQuery, ValidatedJson};
