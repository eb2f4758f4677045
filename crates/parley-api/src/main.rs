//! Parley CLI and REST API entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, initializes the database and chat service, then
//! either starts the REST API server or runs a one-shot command.

mod http;
mod state;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use http::extractors::auth::mint_api_key;
use http::router::build_router;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "parley", about = "Session-scoped LLM chatbot service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Machine-readable output for one-shot commands
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8484")]
        bind: String,
    },
    /// Mint an API key bound to an opaque user id
    Keygen {
        /// User id the key authenticates as
        #[arg(long)]
        user: String,
        /// Human-readable key label
        #[arg(long, default_value = "default")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parley=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { bind } => {
            let router = build_router(state);
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            tracing::info!(%bind, "listening");
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }

        Commands::Keygen { user, name } => {
            let key = mint_api_key(&state.db_pool, &user, &name).await?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "user_id": user, "name": name, "key": key })
                );
            } else {
                println!("API key for '{user}' (shown once, only the hash is stored):");
                println!("{key}");
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install ctrl-c handler: {e}");
    }
}
