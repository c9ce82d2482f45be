//! MCP client for the remote tool server (streamable HTTP transport).

use std::time::Duration;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ClientInfo, Content, JsonObject, ProtocolVersion,
        ResourceContents,
    },
    service::{ClientInitializeError, DynService, RoleClient, RunningService, ServiceError, ServiceExt},
    transport::StreamableHttpClientTransport,
};
use tracing::{debug, info};

use crate::error::XpostError;
use crate::tools::RawToolDescriptor;
use crate::types::{ResultContent, ToolExecutionResult};

type DynClientService = Box<dyn DynService<RoleClient>>;
pub type McpRunningService = RunningService<RoleClient, DynClientService>;

/// Client for a Model Context Protocol server.
pub struct McpClient {
    session: McpRunningService,
}

impl McpClient {
    /// Connect and run the MCP handshake, giving up after `timeout`.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, XpostError> {
        debug!(url, timeout_ms = timeout.as_millis() as u64, "connecting to MCP server");

        let transport = StreamableHttpClientTransport::from_uri(url.to_string());
        let client_info = ClientInfo {
            protocol_version: ProtocolVersion::LATEST,
            ..Default::default()
        };

        let session = tokio::time::timeout(timeout, client_info.into_dyn().serve(transport))
            .await
            .map_err(|_| XpostError::Timeout(timeout.as_millis() as u64))?
            .map_err(map_client_initialize_error)?;

        info!(url, "connected to MCP server");
        Ok(Self::from_running_service(session))
    }

    /// Create a client from an already-running rmcp service.
    pub fn from_running_service(session: McpRunningService) -> Self {
        Self { session }
    }

    /// List available tools from the MCP server.
    pub async fn list_tools(&mut self) -> Result<Vec<RawToolDescriptor>, XpostError> {
        self.ensure_open()?;

        let tools = match self.session.list_all_tools().await {
            Ok(tools) => tools,
            Err(ServiceError::UnexpectedResponse) => {
                self.session
                    .list_tools(None)
                    .await
                    .map_err(|e| map_service_error("list_tools", e))?
                    .tools
            }
            Err(e) => return Err(map_service_error("list_tools", e)),
        };

        Ok(tools.into_iter().map(map_mcp_tool_schema).collect())
    }

    /// Execute a tool on the MCP server.
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<ToolExecutionResult, XpostError> {
        self.ensure_open()?;

        let result = self
            .session
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_owned().into(),
                arguments: Some(arguments),
                task: None,
            })
            .await
            .map_err(|e| map_service_error("call_tool", e))?;

        map_call_result(name, result)
    }

    fn ensure_open(&self) -> Result<(), XpostError> {
        if self.session.is_closed() {
            return Err(XpostError::Transport("MCP session is closed".into()));
        }
        Ok(())
    }
}

fn map_mcp_tool_schema(tool: rmcp::model::Tool) -> RawToolDescriptor {
    RawToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|d| d.to_string()),
        input_schema: serde_json::Value::Object((*tool.input_schema).clone()),
    }
}

fn content_entries(content: &[Content]) -> Vec<ResultContent> {
    let mut entries = Vec::new();
    for item in content {
        if let Some(text) = item.as_text() {
            entries.push(ResultContent {
                text: text.text.clone(),
                kind: Some("text".into()),
            });
            continue;
        }
        if let Some(resource) = item.as_resource() {
            if let ResourceContents::TextResourceContents { text, .. } = &resource.resource {
                entries.push(ResultContent {
                    text: text.clone(),
                    kind: Some("resource".into()),
                });
            }
        }
    }
    entries
}

fn map_call_result(name: &str, result: CallToolResult) -> Result<ToolExecutionResult, XpostError> {
    let content = content_entries(&result.content);

    if result.is_error.unwrap_or(false) {
        let message = content
            .first()
            .map(|entry| entry.text.clone())
            .filter(|text| !text.is_empty())
            .or_else(|| result.structured_content.as_ref().map(|v| v.to_string()))
            .unwrap_or_else(|| "MCP tool returned an error result".into());

        return Err(XpostError::ToolExecution {
            tool_name: name.to_string(),
            message,
        });
    }

    Ok(ToolExecutionResult { content })
}

fn map_client_initialize_error(error: ClientInitializeError) -> XpostError {
    XpostError::Transport(format!("MCP handshake failed: {error}"))
}

/// Request timeouts keep their own variant; everything else is a transport failure.
fn map_service_error(operation: &str, error: ServiceError) -> XpostError {
    match error {
        ServiceError::Timeout { timeout } => XpostError::Timeout(timeout.as_millis() as u64),
        other => XpostError::Transport(format!("{operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_mcp_tool_schema_copies_fields() {
        let mut schema = serde_json::Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), json!({"status": {"type": "string"}}));
        let tool = rmcp::model::Tool::new("createPost", "Create a post", schema);

        let mapped = map_mcp_tool_schema(tool);
        assert_eq!(mapped.name, "createPost");
        assert_eq!(mapped.description.as_deref(), Some("Create a post"));
        assert_eq!(mapped.input_schema["properties"]["status"]["type"], "string");
    }

    #[test]
    fn map_call_result_keeps_text_entries_in_order() {
        let result: CallToolResult = serde_json::from_value(json!({
            "content": [
                { "type": "text", "text": "Tweeted: hello" },
                { "type": "text", "text": "second" }
            ],
            "isError": false
        }))
        .expect("fixture call result should deserialize");

        let mapped = map_call_result("createPost", result).expect("success result");
        assert_eq!(mapped.first_text(), Some("Tweeted: hello"));
        assert_eq!(mapped.content.len(), 2);
    }

    #[test]
    fn map_call_result_returns_tool_execution_error_for_error_payload() {
        let result: CallToolResult = serde_json::from_value(json!({
            "content": [
                { "type": "text", "text": "Twitter API: Rate limit exceeded. Please try again later." }
            ],
            "isError": true
        }))
        .expect("fixture call result should deserialize");

        let err = map_call_result("createPost", result)
            .expect_err("error result should map to tool execution error");
        assert!(matches!(
            err,
            XpostError::ToolExecution { tool_name, message }
            if tool_name == "createPost" && message.contains("Rate limit")
        ));
    }

    #[test]
    fn map_service_error_timeout_maps_to_timeout_error() {
        let err = map_service_error(
            "call_tool",
            ServiceError::Timeout {
                timeout: Duration::from_millis(2750),
            },
        );
        assert!(matches!(err, XpostError::Timeout(2750)));
    }

    #[test]
    fn closed_transport_names_the_operation() {
        let err = map_service_error("call_tool", ServiceError::TransportClosed);
        assert!(matches!(
            err,
            XpostError::Transport(message) if message.starts_with("call_tool: ")
        ));
    }

    #[test]
    fn failed_handshake_is_a_transport_error() {
        let err = map_client_initialize_error(ClientInitializeError::ConnectionClosed(
            "initialize response".into(),
        ));
        assert!(matches!(
            err,
            XpostError::Transport(message) if message.starts_with("MCP handshake failed: ")
        ));
    }

    #[tokio::test]
    async fn connect_to_unreachable_server_fails_without_hanging() {
        let result = McpClient::connect("http://127.0.0.1:9/mcp", Duration::from_secs(5)).await;
        match result {
            Ok(_) => panic!("connecting to a closed port should fail"),
            Err(err) => assert!(matches!(err, XpostError::Transport(_) | XpostError::Timeout(_))),
        }
    }
}
