//! Provider-neutral model responses and their interpretation.

use serde::{Deserialize, Serialize};

use crate::error::ModelResponseError;

use super::message::ToolInvocationRequest;

/// Everything a completion call returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelResponse {
    pub candidates: Vec<Candidate>,
}

/// One candidate answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub parts: Vec<ResponsePart>,
}

/// One part of a candidate: text, a function call, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponsePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<ToolInvocationRequest>,
}

impl ResponsePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
        }
    }

    pub fn function_call(request: ToolInvocationRequest) -> Self {
        Self {
            text: None,
            function_call: Some(request),
        }
    }
}

/// What the loop should do with a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Final assistant text for this turn.
    Text(String),
    /// A single tool invocation.
    ToolCall(ToolInvocationRequest),
    /// The model asked for several tools at once. Only the first one is run.
    MultipleToolCalls(Vec<ToolInvocationRequest>),
}

impl ModelResponse {
    /// Response with a single candidate made of `parts`.
    pub fn from_parts(parts: Vec<ResponsePart>) -> Self {
        Self {
            candidates: vec![Candidate { parts }],
        }
    }

    /// Interpret the first candidate.
    ///
    /// The first part decides: a function call there means a tool invocation,
    /// anything else means final text (empty when the part has none).
    pub fn interpret(&self) -> Result<ModelReply, ModelResponseError> {
        let candidate = self
            .candidates
            .first()
            .ok_or(ModelResponseError::NoCandidates)?;
        let first = candidate.parts.first().ok_or(ModelResponseError::NoParts)?;

        let Some(call) = first.function_call.clone() else {
            return Ok(ModelReply::Text(first.text.clone().unwrap_or_default()));
        };

        let mut calls = vec![call];
        calls.extend(
            candidate.parts[1..]
                .iter()
                .filter_map(|part| part.function_call.clone()),
        );

        if calls.len() == 1 {
            Ok(ModelReply::ToolCall(calls.remove(0)))
        } else {
            Ok(ModelReply::MultipleToolCalls(calls))
        }
    }
}
