//! Mini Radar Client - terminal radar display
//!
//! Fetches map metadata, opens one WebSocket to the server and redraws the
//! radar at a fixed frame rate from whatever snapshot arrived last.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_radar::client::{fetch_map, run_connection, Connection, SnapshotStore};
use mini_radar::config::ClientConfig;
use mini_radar::radar::ascii::terminal_frame;
use mini_radar::radar::{AsciiCanvas, Radar};

/// Surface pixels per terminal column / row
const PX_PER_COL: u32 = 5;
const PX_PER_ROW: u32 = 10;

// Both loops share one thread, like a browser page
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env()?;
    init_tracing(&config.log_level);

    let http = reqwest::Client::new();
    let map = fetch_map(&http, &config.map_url()).await?;
    info!(map = %map.name, "Loaded map metadata");

    let size = config.surface_size;
    let radar = Radar::new(map.world_bounds, size, size);
    let mut canvas = AsciiCanvas::new(
        size,
        size,
        (size / PX_PER_COL) as usize,
        (size / PX_PER_ROW) as usize,
    );

    let store = Arc::new(SnapshotStore::new());
    let connection = Arc::new(Connection::new());
    let mut status_rx = connection.subscribe();
    let mut status = status_rx.borrow_and_update().status_text(&map);

    tokio::spawn(run_connection(config.ws_url(), connection.clone(), store.clone()));

    let detail = format!("{} \u{2022} {}", map.name, config.server_url);
    let mut frames = interval(Duration::from_secs_f64(1.0 / config.fps as f64));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                if status_rx.has_changed().unwrap_or(false) {
                    status = status_rx.borrow_and_update().status_text(&map);
                }

                let players = store.latest();
                radar.render(&mut canvas, &players);

                let mut out = std::io::stdout().lock();
                out.write_all(terminal_frame(&canvas, &status, &detail).as_bytes())?;
                out.flush()?;
            }
            _ = &mut ctrl_c => {
                info!("Received Ctrl+C, exiting");
                break;
            }
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so they do not tear the radar frame
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
