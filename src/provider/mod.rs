//! Model provider trait and the Gemini implementation.

pub mod google;
pub mod http;

use async_trait::async_trait;

use crate::config::XpostConfig;
use crate::error::XpostError;
use crate::models::google::GoogleModel;
use crate::tools::ToolDescriptor;
use crate::types::{GenerationSettings, ModelResponse, Turn};

/// Core trait implemented by LLM completion backends.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "google").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Ask the model for the next reply given the full history and the
    /// callable tools.
    async fn generate(
        &self,
        history: &[Turn],
        tools: &[ToolDescriptor],
    ) -> Result<ModelResponse, XpostError>;
}

/// Create the Gemini provider for `config.model`.
pub fn create_provider(
    config: &XpostConfig,
    settings: GenerationSettings,
) -> Result<Box<dyn ModelProvider>, XpostError> {
    let api_key = config.require_api_key("google", "GEMINI_API_KEY")?;
    let model: GoogleModel = config
        .model
        .parse()
        .map_err(|_| XpostError::Configuration(format!("Invalid model '{}'", config.model)))?;

    Ok(Box::new(
        google::GoogleProvider::new(model, api_key, config.get_base_url("google"))
            .with_settings(settings),
    ))
}
