//! Set of open WebSocket connections

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;
use uuid::Uuid;

/// Frames a connection may hold before further frames are skipped
pub const OUTBOUND_BUFFER: usize = 1;

/// Registry of all open connections, keyed by connection id
pub struct ConnectionHub {
    connections: DashMap<Uuid, mpsc::Sender<Arc<str>>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Add a connection and return its id plus the receiving end of its
    /// outbound frame queue
    pub fn register(&self) -> (Uuid, mpsc::Receiver<Arc<str>>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
        self.connections.insert(id, tx);
        (id, rx)
    }

    pub fn unregister(&self, id: &Uuid) -> bool {
        self.connections.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Offer a frame to every connection without waiting on any of them.
    /// Connections that are busy or closing are skipped for this frame.
    ///
    /// Returns how many connections accepted the frame.
    pub fn broadcast(&self, payload: Arc<str>) -> usize {
        let mut delivered = 0;
        for entry in self.connections.iter() {
            match entry.value().try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    trace!(connection_id = %entry.key(), "Connection busy, skipping frame");
                }
                Err(TrySendError::Closed(_)) => {
                    trace!(connection_id = %entry.key(), "Connection closing, skipping frame");
                }
            }
        }
        delivered
    }
}

impl Default for ConnectionHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_to_nobody_is_a_no_op() {
        let hub = ConnectionHub::new();
        assert!(hub.is_empty());
        assert_eq!(hub.broadcast(Arc::from("{}")), 0);
    }

    #[tokio::test]
    async fn every_registered_connection_gets_the_frame() {
        let hub = ConnectionHub::new();
        let (_a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();
        assert_eq!(hub.len(), 2);

        assert_eq!(hub.broadcast(Arc::from("frame-1")), 2);
        assert_eq!(rx_a.recv().await.as_deref(), Some("frame-1"));
        assert_eq!(rx_b.recv().await.as_deref(), Some("frame-1"));
    }

    #[test]
    fn busy_connections_are_skipped_not_queued() {
        let hub = ConnectionHub::new();
        let (_id, mut rx) = hub.register();

        assert_eq!(hub.broadcast(Arc::from("first")), 1);
        // Nothing drained yet, so the second frame is dropped for this receiver
        assert_eq!(hub.broadcast(Arc::from("second")), 0);

        let first = tokio_test::block_on(rx.recv());
        assert_eq!(first.as_deref(), Some("first"));

        let mut next = tokio_test::task::spawn(rx.recv());
        tokio_test::assert_pending!(next.poll());
    }

    #[test]
    fn closed_connections_are_skipped() {
        let hub = ConnectionHub::new();
        let (closed, rx) = hub.register();
        let (_open, _rx_open) = hub.register();
        drop(rx);

        assert_eq!(hub.broadcast(Arc::from("frame")), 1);
        assert!(hub.unregister(&closed));
        assert!(!hub.unregister(&closed));
        assert_eq!(hub.len(), 1);
    }
}
