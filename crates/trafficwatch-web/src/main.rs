//! Main entry point for the traffic dashboard server

use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use trafficwatch_core::{Config, context_error, context_error::Result, init_logging};
use trafficwatch_web::build_app;

/// Traffic monitoring dashboard
#[derive(Debug, Parser)]
#[command(name = "trafficwatch-server", version, about)]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "TRAFFICWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    host: Option<String>,

    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())
        .map_err(|e| context_error!("Failed to load configuration: {}", e))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(&config.logging)?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!(
        "║       Traffic Prediction Dashboard v{}                ║",
        env!("CARGO_PKG_VERSION")
    );
    info!("╚══════════════════════════════════════════════════════════╝");
    info!(
        upload_latency_ms = config.simulator.upload_latency_ms,
        history_latency_ms = config.simulator.history_latency_ms,
        threshold = config.simulator.congestion_threshold,
        "Simulator settings"
    );
    if !config.simulator.seed_sample_data {
        warn!("Sample data disabled, starting with an empty store");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| context_error!("Invalid server address: {}", e))?;

    let app = build_app(config).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| context_error!("Failed to bind to {}: {}", addr, e))?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║                     SERVER READY                         ║");
    info!("╟──────────────────────────────────────────────────────────╢");
    info!("║ 🌐 Dashboard: http://{}", addr);
    info!("║ 🔌 API:       http://{}/api/records", addr);
    info!("║ 💚 Health:    http://{}/health", addr);
    info!("╚══════════════════════════════════════════════════════════╝");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| context_error!("Server error: {}", e))?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
