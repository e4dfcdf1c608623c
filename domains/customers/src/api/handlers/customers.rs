//! Customer record API handlers
//!
//! - GET /v1/customers - List customers
//! - POST /v1/customers - Create a customer
//! - POST /v1/customers/many - Create several customers at once
//! - GET /v1/customers/{id} - Get a customer
//! - PUT /v1/customers/{id} - Update a customer
//! - DELETE /v1/customers/{id} - Delete a customer

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_auth::AccessToken;
use storefront_common::{Error, Pagination, Result, ValidPath, ValidQuery, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::CustomersState;
use crate::domain::entities::Customer;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    /// Opening balance, zero when omitted
    #[serde(default)]
    pub wallet: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(transparent)]
pub struct CreateCustomersRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub customers: Vec<CreateCustomerRequest>,
}

/// Fields left out keep their stored value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub wallet: Option<Decimal>,
}

fn not_found() -> Error {
    Error::NotFound("Customer not found".to_string())
}

fn build(request: CreateCustomerRequest) -> Result<Customer> {
    Customer::new(request.name, request.email, request.wallet)
        .map_err(|e| Error::Validation(e.to_string()))
}

/// GET /v1/customers - List customers
pub async fn list_customers(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidQuery(page): ValidQuery<Pagination>,
) -> Result<Json<Vec<Customer>>> {
    let customers = state.customers.list(page).await?;
    Ok(Json(customers))
}

/// POST /v1/customers - Create a customer
pub async fn create_customer(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>)> {
    let customer = build(request)?;
    let created = state.customers.create(&customer).await?;

    tracing::info!(customer_id = %created.id, "Customer created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /v1/customers/many - Create several customers in one transaction
pub async fn create_customers(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidatedJson(request): ValidatedJson<CreateCustomersRequest>,
) -> Result<(StatusCode, Json<Vec<Customer>>)> {
    let customers = request
        .customers
        .into_iter()
        .map(build)
        .collect::<Result<Vec<_>>>()?;

    let created = state.customers.create_many(&customers).await?;

    tracing::info!(count = created.len(), "Customers created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /v1/customers/{id} - Get a customer
pub async fn get_customer(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<Customer>> {
    let customer = state.customers.get_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(customer))
}

/// PUT /v1/customers/{id} - Update a customer
pub async fn update_customer(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<Customer>> {
    let mut customer = state.customers.get_by_id(id).await?.ok_or_else(not_found)?;

    if let Some(name) = request.name {
        customer.name = name;
    }
    if let Some(email) = request.email {
        customer.email = email;
    }
    if let Some(wallet) = request.wallet {
        customer
            .set_wallet(wallet)
            .map_err(|e| Error::Validation(e.to_string()))?;
    }

    let updated = state.customers.update(&customer).await?.ok_or_else(not_found)?;

    Ok(Json(updated))
}

/// DELETE /v1/customers/{id} - Delete a customer
pub async fn delete_customer(
    AccessToken(_token): AccessToken,
    State(state): State<CustomersState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<StatusCode> {
    if !state.customers.delete(id).await? {
        return Err(not_found());
    }

    tracing::info!(customer_id = %id, "Customer deleted");

    Ok(StatusCode::NO_CONTENT)
}
