//! Storefront application composition root
//!
//! Composes all domain routers into a single application.

pub mod session;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    response::Html,
    routing::get,
    Router,
};
use sqlx::PgPool;
use storefront_auth::AuthConfig;
use storefront_common::Config;
use storefront_customers::{CustomerRepository, CustomersState};
use storefront_identity::IdentityService;
use storefront_inventory::{InventoryRepository, InventoryState};
use storefront_reviews::{ReviewRepository, ReviewsState};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
};
use tracing_subscriber::EnvFilter;

use crate::session::SessionState;

/// Maximum accepted request body
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes.
///
/// Fails if the auth configuration could never verify a token, so a
/// missing `JWT_SECRET` stops the process before it serves anything.
pub fn create_app(
    config: &Config,
    auth_config: AuthConfig,
    identity: Arc<dyn IdentityService>,
    pool: PgPool,
) -> Result<Router, anyhow::Error> {
    auth_config.validate()?;

    let session_state = SessionState {
        auth_config: auth_config.clone(),
        identity,
    };

    let customers_state = CustomersState {
        customers: CustomerRepository::new(pool.clone()),
        auth_config: auth_config.clone(),
    };

    let inventory_state = InventoryState {
        inventory: InventoryRepository::new(pool.clone()),
        auth_config: auth_config.clone(),
    };

    let reviews_state = ReviewsState {
        reviews: ReviewRepository::new(pool),
        auth_config,
    };

    let landing = landing_page(config);

    let app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/",
            get(move || {
                let page = landing.clone();
                async move { Html(page) }
            }),
        )
        .merge(session::routes().with_state(session_state))
        .merge(storefront_customers::routes().with_state(customers_state))
        .merge(storefront_inventory::routes().with_state(inventory_state))
        .merge(storefront_reviews::routes().with_state(reviews_state));

    Ok(app)
}

/// CORS for the browser frontend: listed origins only, with credentials
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Log filter built from the configured `RUST_LOG` directives
pub fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::new(&config.rust_log)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

fn landing_page(config: &Config) -> String {
    format!(
        r#"<html>
    <head>
        <title>{title}</title>
        <style>
            body {{ font-family: Arial, sans-serif; padding: 20px; }}
            h1 {{ color: #333; }}
            p {{ color: #666; }}
            a {{ color: #06f; }}
        </style>
    </head>
    <body>
        <h1>Welcome to the {title}</h1>
        <p>{description}</p>
        <p>Version {version}. Health check at <a href="/health">/health</a></p>
    </body>
</html>"#,
        title = config.app_title,
        description = config.app_description,
        version = config.app_version,
    )
}
