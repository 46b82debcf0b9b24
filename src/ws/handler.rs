//! WebSocket upgrade handler

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::app::AppState;

/// WebSocket upgrade handler. No authentication: every upgrade joins the
/// broadcast set.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle the upgraded WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (connection_id, frame_rx) = state.hub.register();
    info!(
        connection_id = %connection_id,
        connections = state.hub.len(),
        "WebSocket connection opened"
    );

    run_session(connection_id, socket, frame_rx).await;

    state.hub.unregister(&connection_id);
    info!(
        connection_id = %connection_id,
        connections = state.hub.len(),
        "WebSocket connection closed"
    );
}

/// Run the WebSocket session with read/write split
async fn run_session(
    connection_id: Uuid,
    socket: WebSocket,
    mut frame_rx: mpsc::Receiver<Arc<str>>,
) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Writer task: hub frames -> WebSocket
    let writer_handle = tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            if let Err(e) = ws_sink.send(Message::Text(frame.to_string())).await {
                debug!(connection_id = %connection_id, error = %e, "WebSocket send failed");
                break;
            }
        }
    });

    // Reader loop: only watches for close, clients have nothing to say
    while let Some(result) = ws_stream.next().await {
        match result {
            Ok(Message::Text(_)) | Ok(Message::Binary(_)) => {
                debug!(connection_id = %connection_id, "Ignoring inbound message");
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                debug!(connection_id = %connection_id, "Client initiated close");
                break;
            }
            Err(e) => {
                error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    writer_handle.abort();
}
