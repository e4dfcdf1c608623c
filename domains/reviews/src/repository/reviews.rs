//! Review repository

use crate::domain::entities::Review;
use sqlx::PgPool;
use storefront_common::{Error, Pagination, Result};
use uuid::Uuid;

const DUPLICATE_REVIEW: &str = "Customer has already reviewed this item";

/// Optional list filters
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewFilter {
    pub product_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Review>> {
        let review: Option<Review> = sqlx::query_as(
            r#"
            SELECT id, customer_id, product_id, rating, comment, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// Newest first
    pub async fn list(&self, filter: ReviewFilter, page: Pagination) -> Result<Vec<Review>> {
        let reviews: Vec<Review> = sqlx::query_as(
            r#"
            SELECT id, customer_id, product_id, rating, comment, created_at
            FROM reviews
            WHERE ($1::UUID IS NULL OR product_id = $1)
              AND ($2::UUID IS NULL OR customer_id = $2)
            ORDER BY created_at DESC, id ASC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(filter.product_id)
        .bind(filter.customer_id)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    pub async fn create(&self, review: &Review) -> Result<Review> {
        let mut conn = self.pool.acquire().await?;
        insert(&mut conn, review).await
    }

    /// Insert several reviews; all or none are stored
    pub async fn create_many(&self, reviews: &[Review]) -> Result<Vec<Review>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(reviews.len());

        for review in reviews {
            created.push(insert(&mut tx, review).await?);
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Only the rating and comment of a review can change
    pub async fn update(&self, review: &Review) -> Result<Option<Review>> {
        let updated: Option<Review> = sqlx::query_as(
            r#"
            UPDATE reviews SET rating = $2, comment = $3
            WHERE id = $1
            RETURNING id, customer_id, product_id, rating, comment, created_at
            "#,
        )
        .bind(review.id)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, DUPLICATE_REVIEW))?;

        Ok(updated)
    }

    /// Returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert(conn: &mut sqlx::PgConnection, review: &Review) -> Result<Review> {
    let created: Review = sqlx::query_as(
        r#"
        INSERT INTO reviews (id, customer_id, product_id, rating, comment, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, customer_id, product_id, rating, comment, created_at
        "#,
    )
    .bind(review.id)
    .bind(review.customer_id)
    .bind(review.product_id)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(review.created_at)
    .fetch_one(conn)
    .await
    .map_err(|e| Error::from_write(e, DUPLICATE_REVIEW))?;

    Ok(created)
}
