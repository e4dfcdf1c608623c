//! Storefront API - AWS Lambda runtime
//!
//! Same router as the local server behind API Gateway, with JSON logs.

use std::sync::Arc;

use lambda_http::{run, Error};
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;

use storefront_app::{body_limit_layer, build_cors_layer, create_app, log_filter};
use storefront_auth::AuthConfig;
use storefront_common::Config;
use storefront_identity::{IdentityConfig, IdentityServiceFactory};

/// One warm Lambda instance serves one request at a time
const MAX_DB_CONNECTIONS: u32 = 2;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env().map_err(|e| Error::from(format!("Config error: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .json()
        .without_time()
        .init();

    let auth_config = AuthConfig::from_env();
    let identity_config = IdentityConfig::from_env()?;

    info!(
        audience = %auth_config.audience,
        algorithm = %auth_config.algorithm,
        identity_provider = %identity_config.provider,
        cors_origins = ?config.cors_allowed_origins,
        "Initializing Storefront API Lambda"
    );

    let identity = IdentityServiceFactory::create(identity_config)?;

    let pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(&config.database_url)
        .await
        .map_err(|e| Error::from(format!("Database error: {}", e)))?;

    let app = create_app(&config, auth_config, Arc::from(identity), pool)
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(body_limit_layer());

    info!(version = %config.app_version, "Storefront API Lambda ready");

    run(app).await
}
