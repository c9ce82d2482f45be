//! Google Gemini API provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::XpostError;
use crate::models::google::GoogleModel;
use crate::tools::ToolDescriptor;
use crate::types::*;

use super::http::{shared_client, status_to_error};
use super::ModelProvider;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Schema keywords Gemini's function declarations reject.
const UNSUPPORTED_SCHEMA_KEYS: [&str; 3] = ["$schema", "additionalProperties", "title"];

pub struct GoogleProvider {
    model: GoogleModel,
    api_key: String,
    base_url: String,
    settings: GenerationSettings,
}

impl GoogleProvider {
    pub fn new(model: GoogleModel, api_key: String, base_url: Option<String>) -> Self {
        Self {
            model,
            api_key,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| BASE_URL.to_string()),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    fn build_request_body(&self, history: &[Turn], tools: &[ToolDescriptor]) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = history
            .iter()
            .map(|turn| {
                // Tool announcements go out as plain text; a functionCall part
                // would require a functionResponse turn right after it.
                let parts: Vec<serde_json::Value> = turn
                    .parts()
                    .iter()
                    .map(|part| serde_json::json!({ "text": part.text }))
                    .collect();
                serde_json::json!({
                    "role": turn.role().to_string(),
                    "parts": parts,
                })
            })
            .collect();

        let mut body = serde_json::Map::new();
        body.insert("contents".into(), serde_json::Value::Array(contents));

        if let Some(ref system) = self.settings.system_instruction {
            body.insert(
                "systemInstruction".into(),
                serde_json::json!({ "parts": [{ "text": system }] }),
            );
        }

        let mut gen_config = serde_json::Map::new();
        if let Some(max) = self.settings.max_tokens {
            gen_config.insert("maxOutputTokens".into(), max.into());
        }
        if let Some(temp) = self.settings.temperature {
            gen_config.insert("temperature".into(), temp.into());
        }
        if !gen_config.is_empty() {
            body.insert("generationConfig".into(), serde_json::Value::Object(gen_config));
        }

        if !tools.is_empty() {
            let fn_decls: Vec<serde_json::Value> = tools.iter().map(function_declaration).collect();
            body.insert(
                "tools".into(),
                serde_json::json!([{ "functionDeclarations": fn_decls }]),
            );
        }

        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl ModelProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn generate(
        &self,
        history: &[Turn],
        tools: &[ToolDescriptor],
    ) -> Result<ModelResponse, XpostError> {
        let body = self.build_request_body(history, tools);
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            self.model.as_str()
        );

        debug!(
            model = self.model.as_str(),
            turns = history.len(),
            tools = tools.len(),
            "Google generate"
        );

        let resp = shared_client()
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: GeminiResponse = resp.json().await?;
        Ok(data.into_model_response())
    }
}

fn function_declaration(tool: &ToolDescriptor) -> serde_json::Value {
    let mut parameters =
        serde_json::to_value(&tool.parameters).unwrap_or_else(|_| serde_json::json!({}));
    strip_unsupported_keys(&mut parameters);

    let mut decl = serde_json::json!({
        "name": tool.name,
        "parameters": parameters,
    });
    if let Some(ref description) = tool.description {
        decl["description"] = serde_json::Value::String(description.clone());
    }
    decl
}

fn strip_unsupported_keys(schema: &mut serde_json::Value) {
    match schema {
        serde_json::Value::Object(map) => {
            for key in UNSUPPORTED_SCHEMA_KEYS {
                map.remove(key);
            }
            for (key, value) in map.iter_mut() {
                match (key.as_str(), value) {
                    // Property names are user data, only their schemas are cleaned.
                    ("properties", serde_json::Value::Object(props)) => {
                        props.values_mut().for_each(strip_unsupported_keys)
                    }
                    (_, value) => strip_unsupported_keys(value),
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_unsupported_keys),
        _ => {}
    }
}

// Internal Gemini response types

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: Option<serde_json::Value>,
}

impl GeminiResponse {
    fn into_model_response(self) -> ModelResponse {
        let candidates = self
            .candidates
            .into_iter()
            .map(|candidate| Candidate {
                parts: candidate
                    .content
                    .map(|content| content.parts)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|part| ResponsePart {
                        text: part.text,
                        function_call: part.function_call.map(|fc| {
                            ToolInvocationRequest::new(
                                fc.name,
                                fc.args.unwrap_or(serde_json::Value::Null),
                            )
                        }),
                    })
                    .collect(),
            })
            .collect();
        ModelResponse { candidates }
    }
}
