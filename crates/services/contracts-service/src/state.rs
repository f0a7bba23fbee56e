//! Application state for dependency injection.

use std::sync::Arc;

use axum::extract::FromRef;

use common::ServiceConfig;
use supabase_rest::IdentityClient;

use crate::service::ContractDesk;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub contracts: Arc<ContractDesk>,
    pub identity: Arc<IdentityClient>,
    pub config: ServiceConfig,
}

impl FromRef<AppState> for Arc<IdentityClient> {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}
