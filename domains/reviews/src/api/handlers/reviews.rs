//! Review API handlers
//!
//! - GET /v1/reviews - List reviews (`product_id` / `customer_id` filters)
//! - POST /v1/reviews - Post a review
//! - POST /v1/reviews/many - Post several reviews at once
//! - GET /v1/reviews/{id} - Get a review
//! - PUT /v1/reviews/{id} - Edit rating or comment
//! - DELETE /v1/reviews/{id} - Remove a review

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use storefront_auth::AccessToken;
use storefront_common::{Error, Pagination, Result, ValidPath, ValidQuery, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ReviewsState;
use crate::domain::entities::{Review, ReviewError};
use crate::repository::reviews::ReviewFilter;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateReviewRequest {
    pub customer_id: Uuid,
    pub product_id: Uuid,

    #[validate(range(min = 1, max = 5))]
    pub rating: i16,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct CreateReviewsRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub reviews: Vec<CreateReviewRequest>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListReviewsQuery {
    pub product_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListReviewsQuery {
    fn filter(&self) -> ReviewFilter {
        ReviewFilter {
            product_id: self.product_id,
            customer_id: self.customer_id,
        }
    }

    fn page(&self) -> Pagination {
        Pagination {
            offset: self.offset,
            limit: self.limit,
        }
    }
}

fn not_found() -> Error {
    Error::NotFound("Review not found".to_string())
}

fn invalid(error: ReviewError) -> Error {
    Error::Validation(error.to_string())
}

fn build(request: CreateReviewRequest) -> Result<Review> {
    Review::new(
        request.customer_id,
        request.product_id,
        request.rating,
        request.comment,
    )
    .map_err(invalid)
}

/// GET /v1/reviews - List reviews
pub async fn list_reviews(
    AccessToken(_token): AccessToken,
    State(state): State<ReviewsState>,
    ValidQuery(query): ValidQuery<ListReviewsQuery>,
) -> Result<Json<Vec<Review>>> {
    let reviews = state.reviews.list(query.filter(), query.page()).await?;
    Ok(Json(reviews))
}

/// POST /v1/reviews - Post a review
pub async fn create_review(
    AccessToken(_token): AccessToken,
    State(state): State<ReviewsState>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    let review = build(request)?;
    let created = state.reviews.create(&review).await?;

    tracing::info!(
        review_id = %created.id,
        product_id = %created.product_id,
        rating = created.rating,
        "Review posted"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /v1/reviews/many - Post several reviews in one transaction
pub async fn create_reviews(
    AccessToken(_token): AccessToken,
    State(state): State<ReviewsState>,
    ValidatedJson(request): ValidatedJson<CreateReviewsRequest>,
) -> Result<(StatusCode, Json<Vec<Review>>)> {
    let reviews = request
        .reviews
        .into_iter()
        .map(build)
        .collect::<Result<Vec<_>>>()?;

    let created = state.reviews.create_many(&reviews).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/reviews/{id} - Get a review
pub async fn get_review(
    AccessToken(_token): AccessToken,
    State(state): State<ReviewsState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<Review>> {
    let review = state.reviews.get_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(review))
}

/// PUT /v1/reviews/{id} - Edit rating or comment
pub async fn update_review(
    AccessToken(_token): AccessToken,
    State(state): State<ReviewsState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> Result<Json<Review>> {
    let mut review = state.reviews.get_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(rating) = request.rating {
        review.set_rating(rating).map_err(invalid)?;
    }
    if let Some(comment) = request.comment {
        review.comment = comment;
    }

    let updated = state.reviews.update(&review).await?.ok_or_else(not_found)?;

    Ok(Json(updated))
}

/// DELETE /v1/reviews/{id} - Remove a review
pub async fn delete_review(
    AccessToken(_token): AccessToken,
    State(state): State<ReviewsState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<StatusCode> {
    if !state.reviews.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(review_id = %id, "Review removed");

    Ok(StatusCode::NO_CONTENT)
}
