//! Inventory API handlers
//!
//! - GET /v1/inventory - List items (optional `category` filter)
//! - POST /v1/inventory - Add an item
//! - POST /v1/inventory/many - Add several items at once
//! - GET /v1/inventory/{id} - Get an item
//! - PUT /v1/inventory/{id} - Update an item
//! - DELETE /v1/inventory/{id} - Remove an item

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_auth::AccessToken;
use storefront_common::{Error, Pagination, Result, ValidPath, ValidQuery, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::InventoryState;
use crate::domain::entities::{InventoryError, InventoryItem};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub category: String,

    pub price: Decimal,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,

    #[serde(default)]
    pub stock_count: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct CreateItemsRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub items: Vec<CreateItemRequest>,
}

/// Fields left out keep their stored value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub stock_count: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListItemsQuery {
    pub fn page(&self) -> Pagination {
        Pagination {
            offset: self.offset,
            limit: self.limit,
        }
    }
}

fn not_found() -> Error {
    Error::NotFound("Item not found".to_string())
}

fn invalid(error: InventoryError) -> Error {
    Error::Validation(error.to_string())
}

fn build(request: CreateItemRequest) -> Result<InventoryItem> {
    InventoryItem::new(
        request.name,
        request.category,
        request.price,
        request.description,
        request.stock_count,
    )
    .map_err(invalid)
}

/// GET /v1/inventory - List items
pub async fn list_items(
    AccessToken(_token): AccessToken,
    State(state): State<InventoryState>,
    ValidQuery(query): ValidQuery<ListItemsQuery>,
) -> Result<Json<Vec<InventoryItem>>> {
    let items = state
        .inventory
        .list(query.category.as_deref(), query.page())
        .await?;
    Ok(Json(items))
}

/// POST /v1/inventory - Add an item
pub async fn create_item(
    AccessToken(_token): AccessToken,
    State(state): State<InventoryState>,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<InventoryItem>)> {
    let item = build(request)?;
    let created = state.inventory.create(&item).await?;

    tracing::info!(item_id = %created.id, category = %created.category, "Inventory item added");

    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /v1/inventory/many - Add several items in one transaction
pub async fn create_items(
    AccessToken(_token): AccessToken,
    State(state): State<InventoryState>,
    ValidatedJson(request): ValidatedJson<CreateItemsRequest>,
) -> Result<(StatusCode, Json<Vec<InventoryItem>>)> {
    let items = request
        .items
        .into_iter()
        .map(build)
        .collect::<Result<Vec<_>>>()?;

    let created = state.inventory.create_many(&items).await?;

    tracing::info!(count = created.len(), "Inventory items added");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/inventory/{id} - Get an item
pub async fn get_item(
    AccessToken(_token): AccessToken,
    State(state): State<InventoryState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<InventoryItem>> {
    let item = state.inventory.get_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(item))
}

/// PUT /v1/inventory/{id} - Update an item
pub async fn update_item(
    AccessToken(_token): AccessToken,
    State(state): State<InventoryState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateItemRequest>,
) -> Result<Json<InventoryItem>> {
    let mut item = state.inventory.get_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(name) = request.name {
        item.name = name;
    }
    if let Some(category) = request.category {
        item.category = category;
    }
    if let Some(description) = request.description {
        item.description = description;
    }
    if let Some(price) = request.price {
        item.set_price(price).map_err(invalid)?;
    }
    if let Some(stock_count) = request.stock_count {
        item.set_stock(stock_count).map_err(invalid)?;
    }

    let updated = state.inventory.update(&item).await?.ok_or_else(not_found)?;

    Ok(Json(updated))
}

/// DELETE /v1/inventory/{id} - Remove an item
pub async fn delete_item(
    AccessToken(_token): AccessToken,
    State(state): State<InventoryState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<StatusCode> {
    if !state.inventory.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(item_id = %id, "Inventory item removed");

    Ok(StatusCode::NO_CONTENT)
}
