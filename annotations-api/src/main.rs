//! annotations-api - public annotations read service
//!
//! Serves a content item's annotations after lifecycle resolution,
//! predicate importance reduction and deduplication.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use annotations_api::{build_router, AnnotationSource, AppState, FixtureSource};
use annotations_core::config::{load_toml_config, ConfigOverrides, ServiceConfig};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for annotations-api
#[derive(Parser, Debug)]
#[command(name = "annotations-api")]
#[command(about = "A public RESTful API for accessing Annotations")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Environment this app is running in
    #[arg(long, env = "APP_ENV")]
    env: Option<String>,

    /// Duration GET responses should be cached for, e.g. 30s or 2h45m
    #[arg(long, env = "CACHE_DURATION")]
    cache_duration: Option<String>,

    /// Log level for the service
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// JSON file with graph annotation rows keyed by content UUID
    #[arg(long, env = "ANNOTATIONS_FIXTURE")]
    fixture: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "ANNOTATIONS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml = load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServiceConfig::resolve(
        ConfigOverrides {
            port: args.port,
            env: args.env,
            cache_duration: args.cache_duration,
            log_level: args.log_level,
            fixture_path: args.fixture,
        },
        toml,
    )
    .context("Invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "annotations_api={level},annotations_core={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting public-annotations-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!(port = config.port, env = %config.env, "Configuration resolved");

    let source: Arc<dyn AnnotationSource> = match &config.fixture_path {
        Some(path) => Arc::new(
            FixtureSource::from_file(path, &config.env)
                .with_context(|| format!("Failed to load fixtures from {}", path.display()))?,
        ),
        None => {
            warn!("No annotation fixture configured; every content lookup will return 404");
            Arc::new(FixtureSource::empty())
        }
    };

    let state = AppState::new(source, config.cache_control_header());
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("public-annotations-api listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install signal handler: {}", e);
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
