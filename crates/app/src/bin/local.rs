//! Storefront API - local development server
//!
//! Pretty logs, a real Postgres pool and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use sqlx::PgPool;
use storefront_app::{body_limit_layer, build_cors_layer, create_app, log_filter};
use storefront_auth::AuthConfig;
use storefront_common::Config;
use storefront_identity::{IdentityConfig, IdentityServiceFactory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config comes first: it carries the log filter
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .pretty()
        .init();

    info!("Starting Storefront API local development server");

    let auth_config = AuthConfig::from_env();
    let identity_config = IdentityConfig::from_env().map_err(|e| {
        error!("Failed to load identity provider configuration: {}", e);
        e
    })?;

    info!(
        algorithm = %auth_config.algorithm,
        audience = %auth_config.audience,
        identity_provider = %identity_config.provider,
        log_filter = %config.rust_log,
        "Configuration loaded successfully"
    );

    let identity = IdentityServiceFactory::create(identity_config)?;

    let pool = PgPool::connect(&config.database_url).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        anyhow::anyhow!("Database connection failed: {}", e)
    })?;

    info!("Database connection established");

    let app = create_app(&config, auth_config, Arc::from(identity), pool).map_err(|e| {
        error!("Failed to create application: {}", e);
        e
    })?;

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(&config.cors_allowed_origins))
            .map_response(axum::response::IntoResponse::into_response)
            .layer(body_limit_layer())
            .into_inner(),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM, whichever comes first
async fn shutdown_signal() {
    let ctrl_c = signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Could not listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let source = tokio::select! {
        result = ctrl_c => {
            if let Err(e) = result {
                error!("Could not listen for Ctrl+C: {}", e);
            }
            "Ctrl+C"
        },
        _ = terminate => "SIGTERM",
    };

    info!(signal = source, "Draining connections before shutdown");
}
