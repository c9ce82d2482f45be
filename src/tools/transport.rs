//! Tool transport: runtime-discovered tools executed by a remote server.

use async_trait::async_trait;

use crate::error::XpostError;
use crate::types::{ToolExecutionResult, ToolInvocationRequest};

use super::catalog::RawToolDescriptor;

/// Trait for transports that can list and execute tools at runtime.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// List the tools the server advertises. Called once at startup.
    async fn list_tools(&self) -> Result<Vec<RawToolDescriptor>, XpostError>;

    /// Execute one tool invocation.
    ///
    /// Failures come back as errors; the caller decides how to surface them.
    async fn call_tool(
        &self,
        request: &ToolInvocationRequest,
    ) -> Result<ToolExecutionResult, XpostError>;
}
