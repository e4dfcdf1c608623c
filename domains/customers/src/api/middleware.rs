//! Customers domain state and auth config integration

use axum::extract::FromRef;
use storefront_auth::AuthConfig;

use crate::CustomerRepository;

/// Application state for the customers domain
#[derive(Clone)]
pub struct CustomersState {
    pub customers: CustomerRepository,
    pub auth_config: AuthConfig,
}

impl FromRef<CustomersState> for AuthConfig {
    fn from_ref(state: &CustomersState) -> Self {
        state.auth_config.clone()
    }
}
