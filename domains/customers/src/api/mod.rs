//! API layer for the customers domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::CustomersState;
pub use routes::routes;
