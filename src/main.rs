use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nebula_tasks::{api, client::TaskClient, config::ServerConfig, db};

#[derive(Parser)]
#[command(name = "nebula-tasks")]
#[command(about = "Minimal task list served over HTTP from SQLite")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Nebula Tasks server
    Serve {
        /// Port for the HTTP API and UI
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Check whether a server is answering
    Status,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "nebula_tasks=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Environment supplies the base config; CLI flags override it
    let mut config = ServerConfig::from_env();
    match cli.command {
        Some(Commands::Serve { port, db }) => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(path) = db {
                config.db_path = Some(path);
            }
            serve(config).await
        }
        Some(Commands::Status) => status().await,
        None => serve(config).await,
    }
}

/// Ask a running server for its health, honoring NEBULA_TASKS_URL.
async fn status() -> anyhow::Result<()> {
    let client = TaskClient::from_env();
    match client.health().await {
        Ok(()) => {
            println!("Nebula Tasks server is running");
            Ok(())
        }
        Err(e) => anyhow::bail!("Nebula Tasks server is not reachable: {}", e),
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Nebula Tasks server on port {}", config.port);

    let db = match &config.db_path {
        Some(path) => db::Database::open(path.clone())?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let app = api::create_router_with_config(db, config.clone());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    tracing::info!(
        "Nebula Tasks server listening on http://127.0.0.1:{}",
        config.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
