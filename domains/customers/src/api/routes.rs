//! Route definitions for the customers domain API

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{customers, wallet};
use super::middleware::CustomersState;

/// Create all customers domain API routes
pub fn routes() -> Router<CustomersState> {
    Router::new()
        .route(
            "/v1/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route("/v1/customers/many", post(customers::create_customers))
        .route(
            "/v1/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/v1/customers/deduct/{id}", put(wallet::deduct_money))
        .route(
            "/v1/customers/add_money/{id}",
            put(wallet::add_money_to_wallet),
        )
}
