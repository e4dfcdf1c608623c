//! Inventory domain: catalogue items, prices and stock levels

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::entities::{InventoryError, InventoryItem};
pub use repository::InventoryRepository;

pub use api::routes;
pub use api::InventoryState;
