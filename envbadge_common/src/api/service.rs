use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::state::APIState;

use super::config::get_config;

/// Read by the client-side badge scripts.
pub const CONFIG_PATH: &str = "/bin/com/merkle/oss/aem/environment-badge/config.json";

pub fn service(state: Arc<APIState>) -> Router {
    Router::new()
        .route(CONFIG_PATH, get(get_config))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
