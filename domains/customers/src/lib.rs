//! Customers domain: customer records and wallet balance operations

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::entities::{Customer, WalletError};
pub use repository::CustomerRepository;

pub use api::routes;
pub use api::CustomersState;
