//! Configuration (layered: CLI flags > env > defaults).

pub mod credentials;

pub use credentials::XCredentials;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Result, XpostError};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MCP_URL: &str = "http://localhost:3001/mcp";
pub const DEFAULT_BIND: &str = "127.0.0.1:3001";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Runtime configuration shared by `chat` and `serve`.
#[derive(Debug, Clone)]
pub struct XpostConfig {
    api_keys: HashMap<String, String>,
    base_urls: HashMap<String, String>,
    pub model: String,
    pub mcp_url: String,
    pub bind: String,
    pub connect_timeout: Duration,
}

impl Default for XpostConfig {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            base_urls: HashMap::new(),
            model: DEFAULT_MODEL.to_string(),
            mcp_url: DEFAULT_MCP_URL.to_string(),
            bind: DEFAULT_BIND.to_string(),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

impl XpostConfig {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // Later entries win, so GEMINI_API_KEY overrides GOOGLE_API_KEY.
        let env_mappings = [("GOOGLE_API_KEY", "google"), ("GEMINI_API_KEY", "google")];
        for (env_var, provider) in env_mappings {
            if let Some(key) = lookup(env_var).filter(|v| !v.is_empty()) {
                config.set_api_key(provider, key);
            }
        }

        let url_mappings = [("GEMINI_BASE_URL", "google"), ("TWITTER_API_BASE_URL", "x")];
        for (env_var, provider) in url_mappings {
            if let Some(url) = lookup(env_var).filter(|v| !v.is_empty()) {
                config.set_base_url(provider, url);
            }
        }

        if let Some(model) = lookup("XPOST_MODEL") {
            config.model = model;
        }
        if let Some(url) = lookup("XPOST_MCP_URL") {
            config.mcp_url = url;
        }
        if let Some(bind) = lookup("XPOST_BIND") {
            config.bind = bind;
        }
        if let Some(ms) = lookup("XPOST_CONNECT_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.connect_timeout = Duration::from_millis(ms);
        }

        config
    }

    pub fn set_api_key(&mut self, provider: &str, key: String) {
        self.api_keys.insert(provider.to_string(), key);
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.get(provider).cloned()
    }

    /// Resolve an API key or fail with a configuration error naming the variable.
    pub fn require_api_key(&self, provider: &str, env_var: &str) -> Result<String> {
        self.get_api_key(provider).ok_or_else(|| {
            XpostError::Configuration(format!("{env_var} environment variable is not set"))
        })
    }

    pub fn set_base_url(&mut self, provider: &str, url: String) {
        self.base_urls.insert(provider.to_string(), url);
    }

    pub fn get_base_url(&self, provider: &str) -> Option<String> {
        self.base_urls.get(provider).cloned()
    }
}
