//! MCP tool server exposing `createPost` over streamable HTTP.

pub mod oauth;
pub mod post;
pub mod x_api;

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ErrorData as McpError, ServerHandler,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::Result as XpostResult;

pub use post::{create_post, truncate_status, PostError, PostOutcome, PostPublisher};
pub use x_api::XApiClient;

/// Name the server reports during the MCP handshake.
pub const SERVER_NAME: &str = "x-post";
/// Path the MCP endpoint is mounted on.
pub const MCP_PATH: &str = "/mcp";

/// Arguments of the `createPost` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreatePostArgs {
    /// Text of the post.
    pub status: String,
}

/// MCP handler for one client session.
#[derive(Clone)]
pub struct PostToolServer {
    publisher: Arc<dyn PostPublisher>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PostToolServer {
    pub fn new(publisher: Arc<dyn PostPublisher>) -> Self {
        Self {
            publisher,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "createPost",
        description = "Create a post on X formally known as Twitter"
    )]
    async fn create_post(
        &self,
        Parameters(CreatePostArgs { status }): Parameters<CreatePostArgs>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match post::create_post(self.publisher.as_ref(), &status).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err) => Ok(CallToolResult::error(vec![Content::text(err.to_string())])),
        }
    }
}

#[tool_handler]
impl ServerHandler for PostToolServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = SERVER_NAME.into();
        info.server_info.version = env!("CARGO_PKG_VERSION").into();
        info.instructions = Some("Use createPost to publish a status on X.".into());
        info
    }
}

/// Axum router serving the MCP endpoint at [`MCP_PATH`].
pub fn router(publisher: Arc<dyn PostPublisher>) -> axum::Router {
    let service = StreamableHttpService::new(
        move || Ok(PostToolServer::new(Arc::clone(&publisher))),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    axum::Router::new().nest_service(MCP_PATH, service)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, publisher: Arc<dyn PostPublisher>) -> XpostResult<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, path = MCP_PATH, "MCP server listening");

    axum::serve(listener, router(publisher))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}

/// Serve on an already-bound listener until the task is dropped.
pub async fn serve_on(
    listener: TcpListener,
    publisher: Arc<dyn PostPublisher>,
) -> XpostResult<()> {
    axum::serve(listener, router(publisher)).await?;
    Ok(())
}
