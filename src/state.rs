use std::sync::Arc;

use crate::config::cookie::CookieConfig;
use crate::config::cors::CorsConfig;
use crate::config::idp::IdProviderConfig;
use crate::config::jwt::JwtConfig;
use crate::store::{DocumentStore, MemoryStore};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub idp_config: Option<IdProviderConfig>,
}

/// Build state from the environment, backed by the in-memory store.
pub async fn init_app_state() -> AppState {
    AppState {
        store: Arc::new(MemoryStore::new()),
        jwt_config: JwtConfig::from_env(),
        cookie_config: CookieConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        idp_config: IdProviderConfig::from_env(),
    }
}
