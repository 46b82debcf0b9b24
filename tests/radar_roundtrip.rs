//! Socket-level integration tests: real server, real WebSocket clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use mini_radar::app::AppState;
use mini_radar::client::{fetch_map, run_connection, Connection, ConnectionState, SnapshotStore};
use mini_radar::config::Config;
use mini_radar::http::build_router;
use mini_radar::radar::{DrawList, Radar};
use mini_radar::ws::protocol::ServerMsg;

/// Spawn a server on an ephemeral port with a fixed seed
async fn spawn_server(player_count: usize) -> anyhow::Result<(SocketAddr, AppState)> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();

    let count = player_count.to_string();
    let config = Config::from_vars(|key| match key {
        "PORT" => Some("0".to_string()),
        "PLAYER_COUNT" => Some(count.clone()),
        "SIM_SEED" => Some("1234".to_string()),
        _ => None,
    })?;

    let state = AppState::new(config);
    tokio::spawn(state.simulation_loop().run());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = build_router(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok((addr, state))
}

#[tokio::test]
async fn websocket_listener_receives_player_snapshots() -> anyhow::Result<()> {
    let (addr, state) = spawn_server(5).await?;

    let (mut ws, _) = connect_async(format!("ws://{}/ws", addr)).await?;

    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(anyhow::Error::from(e)),
                None => return Err(anyhow::anyhow!("stream ended")),
            }
        }
    })
    .await??;

    let json: serde_json::Value = serde_json::from_str(&frame)?;
    assert_eq!(json["type"], "players");
    assert!(json["timestamp"].as_u64().unwrap_or(0) > 0);

    let ServerMsg::Players { players, .. } = ServerMsg::from_text(&frame)?;
    assert_eq!(players.len(), 5);
    for p in &players {
        assert!((0.0..360.0).contains(&p.yaw));
        assert!(p.alive);
    }
    assert_eq!(state.hub.len(), 1);

    // Closing the socket removes the connection from the broadcast set
    ws.close(None).await?;
    tokio::time::timeout(Duration::from_secs(5), async {
        while state.hub.len() != 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await?;

    Ok(())
}

#[tokio::test]
async fn radar_client_pipeline_end_to_end() -> anyhow::Result<()> {
    let (addr, _state) = spawn_server(3).await?;
    let base = format!("http://{}", addr);

    let map = fetch_map(&reqwest::Client::new(), &format!("{}/api/map", base)).await?;
    assert_eq!(map.name, "de_demo");

    let store = Arc::new(SnapshotStore::new());
    let connection = Arc::new(Connection::new());
    let mut snapshots = store.subscribe();
    tokio::spawn(run_connection(
        format!("ws://{}/ws", addr),
        connection.clone(),
        store.clone(),
    ));

    tokio::time::timeout(Duration::from_secs(5), snapshots.changed()).await??;
    assert_eq!(connection.state(), ConnectionState::Open);

    let radar = Radar::new(map.world_bounds, 400, 400);
    let mut canvas = DrawList::new(400, 400);
    radar.render(&mut canvas, &store.latest());
    assert_eq!(canvas.fills().count(), 3);

    Ok(())
}

#[tokio::test]
async fn unreachable_server_leaves_connection_closed() -> anyhow::Result<()> {
    // Grab a free port, then release it so nothing is listening
    let addr = TcpListener::bind("127.0.0.1:0").await?.local_addr()?;

    let store = Arc::new(SnapshotStore::new());
    let connection = Arc::new(Connection::new());
    run_connection(format!("ws://{}/ws", addr), connection.clone(), store.clone()).await;

    assert_eq!(connection.state(), ConnectionState::Closed);
    assert!(store.latest().is_empty());
    Ok(())
}
