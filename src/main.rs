use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subs::{config::load_config_file, web, AppState, Tracker};

/// Track the game clock and each player's time on the field
#[derive(Debug, Parser)]
#[command(name = "subs", version, about)]
struct Args {
    /// JSON file to read configuration from
    #[arg(long, env = "SUBS_CONFIG_FILE", default_value = "config.json")]
    config_file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "SUBS_LISTEN", default_value = "0.0.0.0:8081")]
    listen: SocketAddr,

    /// Directory holding robots.txt, favicon.ico and /static files
    #[arg(long, env = "SUBS_ASSETS_DIR", default_value = "assets")]
    assets_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting subs");

    let config = load_config_file(&args.config_file)
        .with_context(|| format!("failed to load config {}", args.config_file.display()))?;

    let tracker = Tracker::new(config.players.clone(), config.tracker_options());
    let app_state = AppState::new(Arc::new(tracker));
    let app = web::router(app_state, &args.assets_dir);

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to listen on {}", args.listen))?;
    info!(
        "Server running on http://{}",
        listener.local_addr().context("listener has no address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(web::shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutdown completed successfully");
    Ok(())
}
