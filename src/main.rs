//! xpost binary entry point.

use std::sync::Arc;

use tracing::info;
use xpost::agent::ChatSession;
use xpost::agent_loop::ConversationLoop;
use xpost::cli::{ChatArgs, Cli, Commands, ServeArgs, StdioConsole};
use xpost::config::{credentials::XCredentials, XpostConfig};
use xpost::error::Result;
use xpost::logging::{init_logging, CHAT_DEFAULT_FILTER, SERVE_DEFAULT_FILTER};
use xpost::mcp::{McpClient, McpToolTransport};
use xpost::server::{self, XApiClient};
use xpost::tools::{adapt, ToolTransport};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let result = match cli.command {
        Commands::Chat(args) => {
            init_logging(CHAT_DEFAULT_FILTER);
            handle_chat(args).await
        }
        Commands::Serve(args) => {
            init_logging(SERVE_DEFAULT_FILTER);
            handle_serve(args).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_chat(args: ChatArgs) -> Result<()> {
    let mut config = XpostConfig::from_env();
    if let Some(model) = args.model.clone() {
        config.model = model;
    }
    if let Some(url) = args.server_url.clone() {
        config.mcp_url = url;
    }

    let provider = xpost::provider::create_provider(&config, args.settings())?;

    let client = McpClient::connect(&config.mcp_url, config.connect_timeout).await?;
    println!("Connected to mcp server");
    let transport: Arc<dyn ToolTransport> = Arc::new(McpToolTransport::new(client));

    let catalog = adapt(&transport.list_tools().await?)?;
    info!(tools = ?catalog.names(), "tool catalog ready");

    let mut chat = ConversationLoop::new(
        provider,
        transport,
        Box::new(StdioConsole::stdio()),
        ChatSession::new(catalog),
    );
    chat.run().await
}

async fn handle_serve(args: ServeArgs) -> Result<()> {
    let mut config = XpostConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let credentials = XCredentials::from_env()?;
    let publisher = XApiClient::new(credentials, config.get_base_url("x"));
    server::serve(&config.bind, Arc::new(publisher)).await
}
