//! Model Context Protocol (MCP) client and tool bridge.

pub mod bridge;
pub mod client;

pub use bridge::McpToolTransport;
pub use client::McpClient;
