use axum::extract::FromRef;
use storefront_auth::AuthConfig;

use crate::ReviewRepository;

#[derive(Clone)]
pub struct ReviewsState {
    pub reviews: ReviewRepository,
    pub auth_config: AuthConfig,
}

impl FromRef<ReviewsState> for AuthConfig {
    fn from_ref(state: &ReviewsState) -> Self {
        state.auth_config.clone()
    }
}
