//! Mini Radar Server - authoritative player simulation
//!
//! This is the main entry point for the radar server. It handles:
//! - The 20 Hz simulation loop and snapshot broadcast
//! - WebSocket connections for snapshot push
//! - HTTP endpoints for map metadata and health

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_radar::app::AppState;
use mini_radar::config::Config;
use mini_radar::http::build_router;
use mini_radar::util::time::init_server_time;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    // Initialize server time tracking
    init_server_time();

    info!("Starting Mini Radar Server");
    info!(
        map = %config.map.name,
        players = config.player_count,
        "Server address: {}", config.server_addr
    );

    // Create application state
    let state = AppState::new(config.clone());

    // Spawn simulation loop
    let simulation = state.simulation_loop();
    tokio::spawn(simulation.run());

    // Build router
    let router = build_router(state);

    // Start server
    let listener = TcpListener::bind(config.server_addr).await?;

    info!("Mini radar server running on http://localhost:{}", config.server_addr.port());
    info!("WebSocket endpoint: ws://{}/ws", config.server_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
