//! API layer for the inventory domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::InventoryState;
pub use routes::routes;
