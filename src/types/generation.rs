//! Generation settings forwarded to the model provider.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Settings controlling text generation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    /// System instruction sent alongside the history.
    pub system_instruction: Option<String>,
}

impl GenerationSettings {
    /// True when no field overrides the provider defaults.
    pub fn is_empty(&self) -> bool {
        self.max_tokens.is_none() && self.temperature.is_none()
    }
}
