//! Fan-out of snapshots to connected listeners

use std::sync::Arc;

use crate::ws::hub::ConnectionHub;
use crate::ws::protocol::ServerMsg;

/// Outcome of a single broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections that accepted the frame
    pub delivered: usize,
    /// Serialized frame size
    pub bytes: usize,
}

/// Serializes a message once and offers it to every open connection
#[derive(Clone)]
pub struct Broadcaster {
    hub: Arc<ConnectionHub>,
}

impl Broadcaster {
    pub fn new(hub: Arc<ConnectionHub>) -> Self {
        Self { hub }
    }

    pub fn broadcast(&self, msg: &ServerMsg) -> Result<BroadcastReport, serde_json::Error> {
        let payload: Arc<str> = Arc::from(msg.to_text()?);
        let bytes = payload.len();
        let delivered = self.hub.broadcast(payload);
        Ok(BroadcastReport { delivered, bytes })
    }

    pub fn connection_count(&self) -> usize {
        self.hub.len()
    }
}
