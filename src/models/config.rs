//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::query::DEFAULT_SEARCH_DEBOUNCE_MS;

fn default_templates_dir() -> String {
    "templates/**/*".to_string()
}

fn default_assets_dir() -> String {
    "./assets".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_per_page() -> usize {
    12
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_cache_capacity() -> usize {
    256
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Key for signing flash message cookies, at least 64 bytes.
    pub secret: String,
    /// Base URL of the notes API, e.g. `https://notehub.example/api`.
    pub notes_api_url: String,
    #[serde(default)]
    pub notes_api_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// How long a listing page stays cached, `0` disables the cache.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Page size sent to the notes API, never zero.
    pub fn per_page(&self) -> usize {
        self.per_page.max(1)
    }
}
