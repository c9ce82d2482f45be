//! X (Twitter) OAuth 1.0a user credentials for the post tool server.

use std::fmt;

use crate::error::{Result, XpostError};

const REQUIRED: [&str; 4] = [
    "TWITTER_API_KEY",
    "TWITTER_API_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_SECRET",
];

/// Consumer key pair plus user access token pair.
#[derive(Clone)]
pub struct XCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"..")
            .field("access_token", &"..")
            .field("access_secret", &"..")
            .finish()
    }
}

impl XCredentials {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup, listing every missing variable on failure.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let values: Vec<Option<String>> = REQUIRED
            .iter()
            .map(|key| lookup(key).filter(|v| !v.is_empty()))
            .collect();

        let missing: Vec<&str> = REQUIRED
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| *key)
            .collect();
        if !missing.is_empty() {
            return Err(XpostError::Configuration(format!(
                "Missing Twitter credentials: {}",
                missing.join(", ")
            )));
        }

        let mut values = values.into_iter().flatten();
        let mut next = || values.next().unwrap_or_default();
        Ok(Self {
            api_key: next(),
            api_secret: next(),
            access_token: next(),
            access_secret: next(),
        })
    }
}
