//! Convenience re-exports for common use.

pub use crate::agent::{ChatSession, ConversationHistory};
pub use crate::agent_loop::{ConversationLoop, LoopState};
pub use crate::cli::{Console, StdioConsole};
pub use crate::config::XpostConfig;
pub use crate::error::{Result, XpostError};
pub use crate::mcp::{McpClient, McpToolTransport};
pub use crate::provider::ModelProvider;
pub use crate::tools::{adapt, ToolCatalog, ToolDescriptor, ToolTransport};
pub use crate::types::{
    GenerationSettings, ModelReply, ModelResponse, Role, ToolExecutionResult,
    ToolInvocationRequest, Turn,
};
