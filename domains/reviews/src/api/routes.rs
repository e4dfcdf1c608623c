//! Route definitions for the reviews domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::reviews;
use super::middleware::ReviewsState;

/// Create all reviews domain API routes
pub fn routes() -> Router<ReviewsState> {
    Router::new()
        .route(
            "/v1/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/v1/reviews/many", post(reviews::create_reviews))
        .route(
            "/v1/reviews/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
}
