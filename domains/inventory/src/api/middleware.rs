//! Inventory domain state and auth config integration

use axum::extract::FromRef;
use storefront_auth::AuthConfig;

use crate::InventoryRepository;

#[derive(Clone)]
pub struct InventoryState {
    pub inventory: InventoryRepository,
    pub auth_config: AuthConfig,
}

impl FromRef<InventoryState> for AuthConfig {
    fn from_ref(state: &InventoryState) -> Self {
        state.auth_config.clone()
    }
}
