//! Inventory repository

use crate::domain::entities::InventoryItem;
use sqlx::PgPool;
use storefront_common::{Error, Pagination, Result};
use uuid::Uuid;

const DUPLICATE_ITEM: &str = "An item with this name already exists in the category";

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<InventoryItem>> {
        let item: Option<InventoryItem> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, description, stock_count, created_at
            FROM inventory
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// List items, optionally restricted to one category
    pub async fn list(
        &self,
        category: Option<&str>,
        page: Pagination,
    ) -> Result<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, description, stock_count, created_at
            FROM inventory
            WHERE $1::TEXT IS NULL OR category = $1
            ORDER BY name ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(category)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn create(&self, item: &InventoryItem) -> Result<InventoryItem> {
        let created = insert(item)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::from_write(e, DUPLICATE_ITEM))?;

        Ok(created)
    }

    /// Insert several items; all or none are stored
    pub async fn create_many(&self, items: &[InventoryItem]) -> Result<Vec<InventoryItem>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for item in items {
            let row = insert(item)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| Error::from_write(e, DUPLICATE_ITEM))?;
            created.push(row);
        }

        tx.commit().await?;

        Ok(created)
    }

    pub async fn update(&self, item: &InventoryItem) -> Result<Option<InventoryItem>> {
        let updated: Option<InventoryItem> = sqlx::query_as(
            r#"
            UPDATE inventory SET
                name = $2,
                category = $3,
                price = $4,
                description = $5,
                stock_count = $6
            WHERE id = $1
            RETURNING id, name, category, price, description, stock_count, created_at
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.price)
        .bind(&item.description)
        .bind(item.stock_count)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, DUPLICATE_ITEM))?;

        Ok(updated)
    }

    /// Returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn insert(
    item: &InventoryItem,
) -> sqlx::query::QueryAs<'_, sqlx::Postgres, InventoryItem, sqlx::postgres::PgArguments> {
    sqlx::query_as(
        r#"
        INSERT INTO inventory (id, name, category, price, description, stock_count, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, category, price, description, stock_count, created_at
        "#,
    )
    .bind(item.id)
    .bind(&item.name)
    .bind(&item.category)
    .bind(item.price)
    .bind(&item.description)
    .bind(item.stock_count)
    .bind(item.created_at)
}
