use std::sync::RwLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// What to inject into the matched admin pages
pub struct BadgeSettings {
    /// Prefix the document title with `document_title_prefix`
    pub enable_document_title_prefix: bool,
    /// Rendered as `<prefix> | <original title>`
    pub document_title_prefix: String,
    /// Render the colored bar at the top of the page
    pub enable_badge: bool,
    /// Text for client-side badges, only exposed through the config endpoint
    pub badge_title: String,
    /// One of the `BackgroundColor` names, anything else renders the fallback color
    pub badge_background_color: String,
}

impl BadgeSettings {
    /// The prefix is only enforced when it is both enabled and set.
    pub fn title_prefix_enabled(&self) -> bool {
        self.enable_document_title_prefix && !self.document_title_prefix.trim().is_empty()
    }

    pub fn badge_enabled(&self) -> bool {
        self.enable_badge
    }

    pub fn any_enabled(&self) -> bool {
        self.title_prefix_enabled() || self.badge_enabled()
    }
}

/// Where the filter and the config endpoint read badge settings from. Implementations must
/// return a fresh snapshot on every call.
pub trait BadgeSettingsSource: Send + Sync {
    fn badge_settings(&self) -> BadgeSettings;
}

/// Settings held in memory that can be swapped at runtime.
#[derive(Debug, Default)]
pub struct SharedSettings {
    inner: RwLock<BadgeSettings>,
}

impl SharedSettings {
    pub fn new(settings: BadgeSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    pub fn update(&self, settings: BadgeSettings) {
        match self.inner.write() {
            Ok(mut guard) => *guard = settings,
            Err(poisoned) => *poisoned.into_inner() = settings,
        }
    }
}

impl BadgeSettingsSource for SharedSettings {
    fn badge_settings(&self) -> BadgeSettings {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
