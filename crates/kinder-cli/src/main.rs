//! Kinder Gateway - children registry over BST and AVL trees

use clap::Parser;
use kinder_cli::{run_server_with_shutdown, server, GatewayConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "kinder-gateway")]
#[command(about = "REST API for children records stored in BST and AVL trees")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "KINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to (overrides the configuration file)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on (overrides the configuration file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long, env = "KINDER_DEBUG")]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "KINDER_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse arguments
    let args = Args::parse();

    // Build configuration
    let mut config = GatewayConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config.debug |= args.debug;

    // Setup logging
    let log_level = if config.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("kinder_cli={log_level},kinder_core={log_level},tower_http=debug").into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Kinder gateway on {}", config.bind_addr());
    tracing::info!(
        bst_duplicates = ?config.bst.duplicates,
        avl_duplicates = ?config.avl.duplicates,
        "Duplicate id handling"
    );

    if !config.cors_enabled {
        tracing::warn!("CORS is disabled");
    }

    // Run the server
    run_server_with_shutdown(config, server::ctrl_c()).await
}
