//! Domain entities for the reviews domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
}

/// A customer's rating of an inventory item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        customer_id: Uuid,
        product_id: Uuid,
        rating: i16,
        comment: String,
    ) -> Result<Self, ReviewError> {
        let mut review = Self {
            id: Uuid::new_v4(),
            customer_id,
            product_id,
            rating: MIN_RATING,
            comment,
            created_at: Utc::now(),
        };
        review.set_rating(rating)?;
        Ok(review)
    }

    pub fn set_rating(&mut self, rating: i16) -> Result<(), ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange);
        }
        self.rating = rating;
        Ok(())
    }
}
