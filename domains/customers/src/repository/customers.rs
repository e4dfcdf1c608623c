//! Customer repository
//!
//! Uses runtime `sqlx::query_as` so the crate builds without a live database.

use crate::domain::entities::Customer;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_common::{Error, Pagination, Result};
use uuid::Uuid;

const DUPLICATE_EMAIL: &str = "Email already registered";

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get customer by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let customer: Option<Customer> = sqlx::query_as(
            r#"
            SELECT id, name, email, wallet, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// List customers, oldest first
    pub async fn list(&self, page: Pagination) -> Result<Vec<Customer>> {
        let customers: Vec<Customer> = sqlx::query_as(
            r#"
            SELECT id, name, email, wallet, created_at
            FROM customers
            ORDER BY created_at ASC, id ASC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn create(&self, customer: &Customer) -> Result<Customer> {
        let created: Customer = sqlx::query_as(
            r#"
            INSERT INTO customers (id, name, email, wallet, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, wallet, created_at
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.wallet)
        .bind(customer.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, DUPLICATE_EMAIL))?;

        Ok(created)
    }

    /// Insert several customers; all or none are stored
    pub async fn create_many(&self, customers: &[Customer]) -> Result<Vec<Customer>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(customers.len());

        for customer in customers {
            let row: Customer = sqlx::query_as(
                r#"
                INSERT INTO customers (id, name, email, wallet, created_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, name, email, wallet, created_at
                "#,
            )
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(customer.wallet)
            .bind(customer.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| Error::from_write(e, DUPLICATE_EMAIL))?;

            created.push(row);
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Update name, email and wallet, returning the stored row
    pub async fn update(&self, customer: &Customer) -> Result<Option<Customer>> {
        let updated: Option<Customer> = sqlx::query_as(
            r#"
            UPDATE customers SET
                name = $2,
                email = $3,
                wallet = $4
            WHERE id = $1
            RETURNING id, name, email, wallet, created_at
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.wallet)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, DUPLICATE_EMAIL))?;

        Ok(updated)
    }

    /// Overwrite the wallet balance, returning the updated row
    pub async fn update_wallet(&self, id: Uuid, wallet: Decimal) -> Result<Option<Customer>> {
        let updated: Option<Customer> = sqlx::query_as(
            r#"
            UPDATE customers SET
                wallet = $2
            WHERE id = $1
            RETURNING id, name, email, wallet, created_at
            "#,
        )
        .bind(id)
        .bind(wallet)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
