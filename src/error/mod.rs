//! Error types for xpost.

use thiserror::Error;

/// Primary error type for all xpost operations.
#[derive(Error, Debug)]
pub enum XpostError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Tool catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Model response error: {0}")]
    ModelResponse(#[from] ModelResponseError),
}

/// A tool descriptor advertised by the tool server cannot be exposed to the model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Tool {tool} has no properties defined")]
    MissingProperties { tool: String },

    #[error("Tool {tool} is advertised more than once")]
    DuplicateTool { tool: String },
}

/// The model reply carried nothing the loop can act on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelResponseError {
    #[error("No candidates in response")]
    NoCandidates,

    #[error("No content or parts in first candidate")]
    NoParts,
}

impl XpostError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, XpostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_converts_into_crate_error() {
        let err: XpostError = CatalogError::DuplicateTool {
            tool: "createPost".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Tool catalog error: Tool createPost is advertised more than once"
        );
    }

    #[test]
    fn catalog_error_names_the_tool() {
        let err = CatalogError::MissingProperties {
            tool: "createPost".into(),
        };
        assert_eq!(err.to_string(), "Tool createPost has no properties defined");
    }
}
