//! Sport5 Fantasy MCP Server — entry point.

use std::sync::Arc;
use tokio::sync::Mutex;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use sport5_fantasy_mcp::config::ServerConfig;
use sport5_fantasy_mcp::protocol::ProtocolHandler;
use sport5_fantasy_mcp::session::FantasySessionManager;
use sport5_fantasy_mcp::tools::ToolRegistry;
use sport5_fantasy_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "sport5-fantasy-mcp",
    about = "MCP server for the Sport5 fantasy league — Google OAuth login, team roster, and league standings",
    version
)]
struct Cli {
    /// Fantasy-site base URL override.
    #[arg(long)]
    base_url: Option<String>,

    /// Local address for the OAuth callback listener.
    #[arg(long)]
    callback_addr: Option<String>,

    /// Redirect URI registered with the Google OAuth client.
    #[arg(long)]
    redirect_uri: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve {
        /// Fantasy-site base URL override.
        #[arg(long)]
        base_url: Option<String>,

        /// Local address for the OAuth callback listener.
        #[arg(long)]
        callback_addr: Option<String>,

        /// Redirect URI registered with the Google OAuth client.
        #[arg(long)]
        redirect_uri: Option<String>,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   sport5-fantasy-mcp completions bash > ~/.local/share/bash-completion/completions/sport5-fantasy-mcp
    ///   sport5-fantasy-mcp completions zsh > ~/.zfunc/_sport5-fantasy-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    // Stdout carries JSON-RPC frames; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        base_url: None,
        callback_addr: None,
        redirect_uri: None,
    }) {
        Commands::Serve {
            base_url,
            callback_addr,
            redirect_uri,
        } => {
            let config = ServerConfig::resolve(
                base_url.or(cli.base_url).as_deref(),
                callback_addr.or(cli.callback_addr).as_deref(),
                redirect_uri.or(cli.redirect_uri).as_deref(),
            );
            tracing::info!("Fantasy site: {}", config.base_url);

            let session = FantasySessionManager::new(config);
            let session = Arc::new(Mutex::new(session));
            let handler = ProtocolHandler::new(session);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let capabilities = sport5_fantasy_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "sport5-fantasy-mcp",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
