use std::{net::SocketAddr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    proxy::util::Origin,
    settings::{BadgeSettings, BadgeSettingsSource, SharedSettings},
};

const fn default_max_capture_bytes() -> usize {
    32 * 1024 * 1024
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The listen address for the proxy server
    pub host: SocketAddr,
    /// The origin of the administrative application behind the proxy, e.g. `http://localhost:4502`
    pub upstream: String,
    /// Upper bound for a response body that is held in memory while it is rewritten
    pub max_capture_bytes: usize,
    /// The badge settings. Without them every page passes through untouched and the config
    /// endpoint answers with an empty object.
    pub badge: Option<BadgeSettings>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: SocketAddr::from(([0, 0, 0, 0], 3069)),
            upstream: "http://localhost:4502".to_string(),
            max_capture_bytes: default_max_capture_bytes(),
            badge: None,
        }
    }
}

impl Config {
    pub fn settings_source(&self) -> Option<Arc<dyn BadgeSettingsSource>> {
        self.badge
            .clone()
            .map(|settings| Arc::new(SharedSettings::new(settings)) as Arc<dyn BadgeSettingsSource>)
    }
}

#[derive(Clone)]
/// The state that is passed to the config endpoint
pub struct APIState {
    pub settings: Option<Arc<dyn BadgeSettingsSource>>,
}

#[derive(Clone)]
/// The state that is passed to the proxy handler
pub struct ProxyState {
    pub upstream: Origin,
    pub client: reqwest::Client,
}

#[derive(Clone)]
/// The state that is passed to the badge filter
pub struct FilterState {
    pub settings: Option<Arc<dyn BadgeSettingsSource>>,
    pub max_capture_bytes: usize,
}
