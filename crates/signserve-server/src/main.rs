//! SignServe Server
//!
//! HTTP service for hand-sign recognition from precomputed joint-angle
//! features. Loads the trained model bundle at startup and serves ranked
//! predictions; a bundle that fails its consistency checks aborts startup.

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use signserve_model::{ArtifactPaths, ModelBundle};
use signserve_server::{create_router, AppState, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "signserve-server")]
#[command(about = "SignServe hand-sign prediction server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Model artifact directory
    #[arg(short, long)]
    model_dir: Option<String>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "5000")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting SignServe server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, cli.model_dir.as_deref())?;
    info!("Model directory: {}", config.model_dir);
    info!("Top-k: {}", config.top_k);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load the model bundle before binding; a bad bundle must never serve
    info!("Loading model bundle...");
    let paths = ArtifactPaths::from_dir(&config.model_dir);
    let bundle = ModelBundle::load(&paths)
        .with_context(|| format!("failed to load model bundle from {}", config.model_dir))?;
    info!(
        num_features = bundle.num_features(),
        num_classes = bundle.num_classes(),
        "Model bundle loaded"
    );

    let state = AppState::new(Arc::new(bundle), config, Some(metrics_handle));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("signserve=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signserve=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "signserve_requests_total",
        "Total number of prediction requests received"
    );
    metrics::describe_counter!("signserve_errors_total", "Total number of errors by kind");
    metrics::describe_histogram!(
        "signserve_predict_latency_us",
        metrics::Unit::Microseconds,
        "Prediction pipeline latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
