//! Customer wallet API handlers
//!
//! - PUT /v1/customers/deduct/{id}?amount= - Take money out of the wallet
//! - PUT /v1/customers/add_money/{id}?money= - Put money into the wallet

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use storefront_auth::AccessToken;
use storefront_common::{Error, ValidPath, ValidQuery};
use uuid::Uuid;

use crate::api::middleware::CustomersState;
use crate::domain::entities::{Customer, WalletError};

/// Query for wallet deduction
#[derive(Debug, Deserialize)]
pub struct DeductQuery {
    pub amount: Decimal,
}

/// Query for wallet top-up
#[derive(Debug, Deserialize)]
pub struct AddMoneyQuery {
    pub money: Decimal,
}

/// Success envelope for wallet operations
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct WalletBalance {
    pub wallet: Decimal,
}

/// Handler error: common errors plus the one that carries a balance
#[derive(Debug)]
pub enum ApiError {
    Common(Error),
    InsufficientFunds { wallet: Decimal },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Common(e) => e.into_response(),
            ApiError::InsufficientFunds { wallet } => {
                let body = Json(json!({
                    "error": {
                        "code": "INSUFFICIENT_FUNDS",
                        "message": "Not enough money in wallet",
                        "details": { "wallet": wallet },
                    }
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError::Common(error)
    }
}

impl From<WalletError> for ApiError {
    fn from(error: WalletError) -> Self {
        let message = error.to_string();
        match error {
            WalletError::InsufficientFunds { wallet } => ApiError::InsufficientFunds { wallet },
            WalletError::NonPositiveAmount | WalletError::NegativeBalance => {
                ApiError::Common(Error::Validation(message))
            }
        }
    }
}

async fn load_customer(state: &CustomersState, id: Uuid) -> Result<Customer, ApiError> {
    state
        .customers
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Common(Error::NotFound("Customer not found".to_string())))
}

/// PUT /v1/customers/deduct/{id} - Deduct money from the customer's wallet
pub async fn deduct_money(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidQuery(query): ValidQuery<DeductQuery>,
) -> Result<Json<ApiResponse<Customer>>, ApiError> {
    let customer = load_customer(&state, id).await?;
    let new_wallet = customer.deduct(query.amount)?;

    let updated = state
        .customers
        .update_wallet(id, new_wallet)
        .await?
        .ok_or_else(|| ApiError::Common(Error::Internal("Failed to update wallet".to_string())))?;

    tracing::info!(customer_id = %id, amount = %query.amount, "Wallet debited");

    Ok(Json(ApiResponse {
        message: "Money deducted successfully".to_string(),
        data: updated,
    }))
}

/// PUT /v1/customers/add_money/{id} - Add money to the customer's wallet
pub async fn add_money_to_wallet(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidQuery(query): ValidQuery<AddMoneyQuery>,
) -> Result<Json<ApiResponse<WalletBalance>>, ApiError> {
    let customer = load_customer(&state, id).await?;
    let new_wallet = customer.credit(query.money)?;

    let updated = state
        .customers
        .update_wallet(id, new_wallet)
        .await?
        .ok_or_else(|| ApiError::Common(Error::Internal("Failed to update wallet".to_string())))?;

    tracing::info!(customer_id = %id, amount = %query.money, "Wallet credited");

    Ok(Json(ApiResponse {
        message: "Money added to wallet".to_string(),
        data: WalletBalance {
            wallet: updated.wallet,
        },
    }))
}
