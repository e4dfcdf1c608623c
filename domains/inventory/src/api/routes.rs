//! Route definitions for the inventory domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::inventory;
use super::middleware::InventoryState;

/// Create all inventory domain API routes
pub fn routes() -> Router<InventoryState> {
    Router::new()
        .route(
            "/v1/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route("/v1/inventory/many", post(inventory::create_items))
        .route(
            "/v1/inventory/{id}",
            get(inventory::get_item)
                .put(inventory::update_item)
                .delete(inventory::delete_item),
        )
}
