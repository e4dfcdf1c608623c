//! API layer for the reviews domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ReviewsState;
pub use routes::routes;
