//! xpost: a Gemini chat client that can post to X through an MCP tool server.
//!
//! The `chat` side discovers tools from a Model Context Protocol server,
//! hands them to Gemini, and runs the tools the model asks for. The `serve`
//! side is that MCP server, exposing a single `createPost` tool backed by
//! the X API.
//!
//! ```no_run
//! use std::sync::Arc;
//! use xpost::prelude::*;
//!
//! # async fn example() -> xpost::error::Result<()> {
//! let config = XpostConfig::from_env();
//! let provider = xpost::provider::create_provider(&config, GenerationSettings::default())?;
//! let client = McpClient::connect(&config.mcp_url, config.connect_timeout).await?;
//! let transport: Arc<dyn ToolTransport> = Arc::new(McpToolTransport::new(client));
//! let catalog = adapt(&transport.list_tools().await?)?;
//!
//! let mut chat = ConversationLoop::new(
//!     provider,
//!     transport,
//!     Box::new(StdioConsole::stdio()),
//!     ChatSession::new(catalog),
//! );
//! chat.run().await
//! # }
//! ```

pub mod agent;
pub mod agent_loop;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod server;
pub mod tools;
pub mod types;
