//! Podcastr web server - Main entry point
//!
//! Serves the podcast listing pages and the player API, backed by the
//! episodes REST API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use podcastr_common::config::{ConfigResolver, TomlConfig};
use podcastr_web::pages::{PageSettings, PageStore};
use podcastr_web::source::HttpEpisodeSource;
use podcastr_web::state::SharedState;
use podcastr_web::{create_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for podcastr-web
#[derive(Parser, Debug)]
#[command(name = "podcastr-web")]
#[command(about = "Podcast listing and playback web server")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "PODCASTR_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind to
    #[arg(long, env = "PODCASTR_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PODCASTR_PORT")]
    port: Option<u16>,

    /// Base URL of the episodes API
    #[arg(long, env = "PODCASTR_API_URL")]
    api_url: Option<String>,
}

impl Args {
    fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_source = ConfigResolver::new(args.config.clone()).source();
    let mut config = config_source
        .load()
        .context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    // Initialize tracing
    let default_filter = format!(
        "podcastr_web={level},podcastr_common={level},tower_http={level}",
        level = config.logging.level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Podcastr v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE"),
    );
    if config_source.is_missing() {
        warn!("{}", config_source);
    } else {
        info!("{}", config_source);
    }
    info!("Episodes API: {}", config.api_url);

    let source = HttpEpisodeSource::new(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to create episodes API client")?;

    let pages = Arc::new(PageStore::new(
        Arc::new(source),
        PageSettings::from(&config),
    ));
    pages.prerender(config.prerender_count).await;

    let app = create_router(AppState::new(Arc::new(SharedState::new()), pages));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
