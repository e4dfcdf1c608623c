//! Domain entities for the inventory domain

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("Stock count cannot be negative")]
    NegativeStock,
}

/// Item offered in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub stock_count: i32,
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        name: String,
        category: String,
        price: Decimal,
        description: String,
        stock_count: i32,
    ) -> Result<Self, InventoryError> {
        let mut item = Self {
            id: Uuid::new_v4(),
            name,
            category,
            price: Decimal::ZERO,
            description,
            stock_count: 0,
            created_at: Utc::now(),
        };
        item.set_price(price)?;
        item.set_stock(stock_count)?;
        Ok(item)
    }

    pub fn set_price(&mut self, price: Decimal) -> Result<(), InventoryError> {
        if price < Decimal::ZERO {
            return Err(InventoryError::NegativePrice);
        }
        self.price = price;
        Ok(())
    }

    pub fn set_stock(&mut self, stock_count: i32) -> Result<(), InventoryError> {
        if stock_count < 0 {
            return Err(InventoryError::NegativeStock);
        }
        self.stock_count = stock_count;
        Ok(())
    }

    pub fn in_stock(&self) -> bool {
        self.stock_count > 0
    }
}
