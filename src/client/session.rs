//! Network side of the radar client

use std::sync::Arc;

use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::game::MapInfo;

use super::connection::Connection;
use super::snapshot::SnapshotStore;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Radar client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Map request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Fetch map metadata from `GET /api/map`
pub async fn fetch_map(http: &reqwest::Client, url: &str) -> Result<MapInfo, ClientError> {
    let map = http
        .get(url)
        .header("Cache-Control", "no-store")
        .send()
        .await?
        .error_for_status()?
        .json::<MapInfo>()
        .await?;
    Ok(map)
}

/// Open the WebSocket. `wss://` URLs go through native TLS.
pub async fn connect(url: &str) -> Result<WsStream, ClientError> {
    let (stream, _response) = connect_async(url).await?;
    Ok(stream)
}

/// Connect once and feed every frame into `store` until the server goes
/// away. The connection ends in `Closed` either way; nothing retries.
pub async fn run_connection(url: String, connection: Arc<Connection>, store: Arc<SnapshotStore>) {
    let mut stream = match connect(&url).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!(url = %url, error = %e, "Failed to connect");
            connection.mark_closed();
            return;
        }
    };

    info!(url = %url, "Connected");
    connection.mark_open();

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                store.apply_text(&text);
            }
            Ok(Message::Close(_)) => {
                debug!("Server closed the connection");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "WebSocket error");
                break;
            }
        }
    }

    connection.mark_closed();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::error::{Error as WsError, UrlError};

    #[tokio::test]
    async fn wss_urls_attempt_a_tls_handshake() {
        // A peer that hangs up right away: the handshake itself must fail
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((socket, _)) = listener.accept().await {
                drop(socket);
            }
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            connect(&format!("wss://{}/ws", addr)),
        )
        .await
        .expect("handshake should not hang");

        match result {
            Err(ClientError::WebSocket(WsError::Url(UrlError::TlsFeatureNotEnabled))) => {
                panic!("client was built without TLS support")
            }
            Err(ClientError::WebSocket(_)) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("handshake with a closed peer succeeded"),
        }
    }
}
