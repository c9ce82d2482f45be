//! Command-line arguments for the `chat` and `serve` subcommands.

use clap::{Parser, Subcommand};

use crate::types::GenerationSettings;

/// Chat with Gemini and post to X through an MCP tool server.
#[derive(Parser, Debug)]
#[command(name = "xpost", version, about = "Gemini chat client with an MCP tool server for X posts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat(ChatArgs),
    /// Run the MCP tool server that posts to X
    Serve(ServeArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Gemini model id (overrides XPOST_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// MCP server endpoint (overrides XPOST_MCP_URL)
    #[arg(long)]
    pub server_url: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Max output tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// System instruction
    #[arg(short, long)]
    pub system: Option<String>,
}

impl ChatArgs {
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_instruction: self.system.clone(),
            ..Default::default()
        }
    }
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides XPOST_BIND)
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
