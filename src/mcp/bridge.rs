//! Bridge the MCP client into the [`ToolTransport`] seam used by the chat loop.

use async_trait::async_trait;
use rmcp::model::JsonObject;
use tokio::sync::Mutex;

use crate::error::XpostError;
use crate::tools::{RawToolDescriptor, ToolTransport};
use crate::types::{ToolExecutionResult, ToolInvocationRequest};

use super::client::McpClient;

#[async_trait]
trait McpClientOps: Send {
    async fn list_tools(&mut self) -> Result<Vec<RawToolDescriptor>, XpostError>;
    async fn call_tool(
        &mut self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<ToolExecutionResult, XpostError>;
}

#[async_trait]
impl McpClientOps for McpClient {
    async fn list_tools(&mut self) -> Result<Vec<RawToolDescriptor>, XpostError> {
        McpClient::list_tools(self).await
    }

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<ToolExecutionResult, XpostError> {
        McpClient::call_tool(self, name, arguments).await
    }
}

/// Tool transport backed by a connected MCP session.
pub struct McpToolTransport {
    client: Mutex<Box<dyn McpClientOps>>,
}

impl McpToolTransport {
    pub fn new(client: McpClient) -> Self {
        Self {
            client: Mutex::new(Box::new(client)),
        }
    }

    #[cfg(test)]
    fn from_client_ops(client: Box<dyn McpClientOps>) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }
}

#[async_trait]
impl ToolTransport for McpToolTransport {
    async fn list_tools(&self) -> Result<Vec<RawToolDescriptor>, XpostError> {
        let mut client = self.client.lock().await;
        client.list_tools().await
    }

    async fn call_tool(
        &self,
        request: &ToolInvocationRequest,
    ) -> Result<ToolExecutionResult, XpostError> {
        let mut client = self.client.lock().await;
        client
            .call_tool(&request.name, request.arguments.clone())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Arc;

    struct MockClientOps {
        tools: Vec<RawToolDescriptor>,
        call_results: VecDeque<Result<ToolExecutionResult, XpostError>>,
        seen_arguments: Arc<std::sync::Mutex<Vec<JsonObject>>>,
    }

    #[async_trait]
    impl McpClientOps for MockClientOps {
        async fn list_tools(&mut self) -> Result<Vec<RawToolDescriptor>, XpostError> {
            Ok(self.tools.clone())
        }

        async fn call_tool(
            &mut self,
            _name: &str,
            arguments: JsonObject,
        ) -> Result<ToolExecutionResult, XpostError> {
            self.seen_arguments
                .lock()
                .expect("lock")
                .push(arguments);
            self.call_results
                .pop_front()
                .unwrap_or_else(|| Err(XpostError::Transport("missing mock result".into())))
        }
    }

    fn mock(call_results: Vec<Result<ToolExecutionResult, XpostError>>) -> MockClientOps {
        MockClientOps {
            tools: vec![RawToolDescriptor {
                name: "createPost".into(),
                description: Some("Create a post".into()),
                input_schema: json!({
                    "type": "object",
                    "properties": { "status": { "type": "string" } },
                    "required": ["status"]
                }),
            }],
            call_results: call_results.into(),
            seen_arguments: Arc::default(),
        }
    }

    #[tokio::test]
    async fn list_tools_passes_descriptors_through() {
        let transport = McpToolTransport::from_client_ops(Box::new(mock(Vec::new())));
        let tools = transport.list_tools().await.expect("tools");
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "createPost");
    }

    #[tokio::test]
    async fn call_tool_sends_arguments_as_object() {
        let ops = mock(vec![Ok(ToolExecutionResult::text("Tweeted: hi"))]);
        let seen = Arc::clone(&ops.seen_arguments);
        let transport = McpToolTransport::from_client_ops(Box::new(ops));

        let result = transport
            .call_tool(&ToolInvocationRequest::new(
                "createPost",
                json!({"status": "hi"}),
            ))
            .await
            .expect("result");

        assert_eq!(result.first_text(), Some("Tweeted: hi"));
        assert_eq!(
            seen.lock().expect("lock").as_slice(),
            &[json!({"status": "hi"}).as_object().cloned().expect("object")]
        );
    }

    #[tokio::test]
    async fn call_tool_propagates_tool_error() {
        let transport = McpToolTransport::from_client_ops(Box::new(mock(vec![Err(
            XpostError::ToolExecution {
                tool_name: "createPost".into(),
                message: "Twitter API: duplicate content".into(),
            },
        )])));

        let err = transport
            .call_tool(&ToolInvocationRequest::new(
                "createPost",
                json!({"status": "hi"}),
            ))
            .await
            .expect_err("tool errors should be propagated");

        assert!(matches!(
            err,
            XpostError::ToolExecution { tool_name, message }
            if tool_name == "createPost" && message.contains("duplicate content")
        ));
    }
}
