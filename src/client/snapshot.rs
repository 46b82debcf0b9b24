//! Latest received snapshot

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::ws::protocol::{PlayerSnapshot, ServerMsg};

/// Holds the most recent player list. The message handler swaps in a new
/// list; the frame loop reads whatever is there, however old.
pub struct SnapshotStore {
    latest: watch::Sender<Arc<Vec<PlayerSnapshot>>>,
}

impl SnapshotStore {
    /// Starts empty
    pub fn new() -> Self {
        let (latest, _) = watch::channel(Arc::new(Vec::new()));
        Self { latest }
    }

    pub fn latest(&self) -> Arc<Vec<PlayerSnapshot>> {
        self.latest.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<PlayerSnapshot>>> {
        self.latest.subscribe()
    }

    pub fn replace(&self, players: Vec<PlayerSnapshot>) {
        self.latest.send_replace(Arc::new(players));
    }

    /// Apply one text frame. Anything that is not a well-formed players
    /// message is dropped and the previous snapshot stays.
    ///
    /// Returns whether the snapshot was replaced.
    pub fn apply_text(&self, text: &str) -> bool {
        match ServerMsg::from_text(text) {
            Ok(ServerMsg::Players { players, .. }) => {
                self.replace(players);
                true
            }
            Err(e) => {
                debug!(error = %e, "Discarding malformed message");
                false
            }
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_PLAYER: &str = r#"{"type":"players","timestamp":1,"players":[
        {"id":"p1","team":"CT","x":10,"y":20,"yaw":45,"alive":true}
    ]}"#;

    #[test]
    fn starts_empty() {
        assert!(SnapshotStore::new().latest().is_empty());
    }

    #[test]
    fn players_message_replaces_snapshot() {
        let store = SnapshotStore::new();
        assert!(store.apply_text(ONE_PLAYER));
        let latest = store.latest();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, "p1");
        assert_eq!((latest[0].x, latest[0].y), (10.0, 20.0));
    }

    #[test]
    fn malformed_payload_keeps_previous_snapshot() {
        let store = SnapshotStore::new();
        store.apply_text(ONE_PLAYER);

        assert!(!store.apply_text("definitely not json"));
        assert!(!store.apply_text(r#"{"type":"players"}"#));
        assert!(!store.apply_text(r#"{"type":"chat","players":[]}"#));

        assert_eq!(store.latest()[0].id, "p1");
    }

    #[test]
    fn empty_player_list_is_a_valid_snapshot() {
        let store = SnapshotStore::new();
        store.apply_text(ONE_PLAYER);
        assert!(store.apply_text(r#"{"type":"players","timestamp":2,"players":[]}"#));
        assert!(store.latest().is_empty());
    }

    #[tokio::test]
    async fn readers_are_notified_of_new_snapshots() {
        let store = SnapshotStore::new();
        let mut rx = store.subscribe();
        store.apply_text(ONE_PLAYER);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }

    #[test]
    fn readers_keep_their_snapshot_across_swaps() {
        let store = SnapshotStore::new();
        store.apply_text(ONE_PLAYER);
        let held = store.latest();
        store.replace(Vec::new());
        assert_eq!(held.len(), 1);
        assert!(store.latest().is_empty());
    }
}
