//! MCP client against the real tool server on an ephemeral port.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{start_tool_server, RecordingPublisher};
use xpost::error::XpostError;
use xpost::mcp::{McpClient, McpToolTransport};
use xpost::server::PostError;
use xpost::tools::{adapt, ToolTransport};
use xpost::types::ToolInvocationRequest;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn server_advertises_create_post() {
    let url = start_tool_server(Arc::new(RecordingPublisher::default())).await;
    let mut client = McpClient::connect(&url, CONNECT_TIMEOUT).await.unwrap();

    let raw = client.list_tools().await.unwrap();
    let catalog = adapt(&raw).unwrap();

    assert_eq!(catalog.names(), vec!["createPost"]);
    let descriptor = catalog.get("createPost").unwrap();
    assert_eq!(
        descriptor.description.as_deref(),
        Some("Create a post on X formally known as Twitter")
    );
    assert_eq!(descriptor.parameters.kind, "object");
    assert!(descriptor.parameters.required.contains("status"));
    assert_eq!(descriptor.parameters.properties["status"]["type"], "string");
}

#[tokio::test]
async fn create_post_round_trip() {
    let publisher = Arc::new(RecordingPublisher::default());
    let url = start_tool_server(Arc::clone(&publisher)).await;
    let transport = McpToolTransport::new(McpClient::connect(&url, CONNECT_TIMEOUT).await.unwrap());

    let result = transport
        .call_tool(&ToolInvocationRequest::new(
            "createPost",
            json!({ "status": "hello world" }),
        ))
        .await
        .unwrap();

    assert_eq!(result.first_text(), Some("Tweeted: hello world"));
    assert_eq!(publisher.published(), vec!["hello world".to_string()]);
}

#[tokio::test]
async fn publisher_failure_comes_back_as_tool_error() {
    let publisher = Arc::new(RecordingPublisher::failing_with(PostError::RateLimited));
    let url = start_tool_server(publisher).await;
    let transport = McpToolTransport::new(McpClient::connect(&url, CONNECT_TIMEOUT).await.unwrap());

    let err = transport
        .call_tool(&ToolInvocationRequest::new("createPost", json!({ "status": "hi" })))
        .await
        .unwrap_err();

    assert!(
        matches!(
            &err,
            XpostError::ToolExecution { tool_name, message }
            if tool_name == "createPost"
                && message == "Twitter API: Rate limit exceeded. Please try again later."
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn unreachable_server_fails_fast() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let started = std::time::Instant::now();
    let result = McpClient::connect(&format!("http://{addr}/mcp"), CONNECT_TIMEOUT).await;

    match result {
        Ok(_) => panic!("connecting to a closed port should fail"),
        Err(err) => assert!(
            matches!(err, XpostError::Transport(_) | XpostError::Timeout(_)),
            "unexpected error: {err}"
        ),
    }
    assert!(started.elapsed() < Duration::from_secs(10));
}
