use std::sync::Arc;

use axum::debug_handler;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::settings::BadgeSettings;
use crate::state::APIState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub enable_document_title_prefix: bool,
    pub document_title_prefix: String,
    pub enable_badge: bool,
    pub badge_background_color: String,
    pub badge_title: String,
}

impl From<BadgeSettings> for ConfigResponse {
    fn from(settings: BadgeSettings) -> Self {
        Self {
            enable_document_title_prefix: settings.enable_document_title_prefix,
            document_title_prefix: settings.document_title_prefix,
            enable_badge: settings.enable_badge,
            badge_background_color: settings.badge_background_color,
            badge_title: settings.badge_title,
        }
    }
}

/// Flat JSON view of the badge settings, `{}` when no settings are configured.
#[debug_handler]
pub async fn get_config(State(state): State<Arc<APIState>>) -> Result<Json<Value>> {
    let body = match &state.settings {
        Some(source) => serde_json::to_value(ConfigResponse::from(source.badge_settings()))?,
        None => Value::Object(Default::default()),
    };

    Ok(Json(body))
}
