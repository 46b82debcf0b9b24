//! Snapshot building

use crate::ws::protocol::{PlayerSnapshot, ServerMsg};

use super::PlayerState;

/// Builds the per-tick snapshot message. Always the full state, never a diff.
pub struct SnapshotBuilder;

impl SnapshotBuilder {
    /// Build a snapshot message stamped with the tick time
    pub fn build(timestamp: u64, players: &[PlayerState]) -> ServerMsg {
        let players: Vec<PlayerSnapshot> = players.iter().map(PlayerState::to_snapshot).collect();
        ServerMsg::Players { timestamp, players }
    }
}

/// Snapshot size stats for debugging
#[derive(Debug, Default)]
pub struct SnapshotStats {
    pub total_snapshots: u64,
    pub total_bytes: u64,
    pub avg_players_per_snapshot: f32,
}

impl SnapshotStats {
    pub fn record(&mut self, player_count: usize, bytes: usize) {
        self.total_snapshots += 1;
        self.total_bytes += bytes as u64;

        // Running average
        let n = self.total_snapshots as f32;
        self.avg_players_per_snapshot =
            self.avg_players_per_snapshot * ((n - 1.0) / n) + (player_count as f32 / n);
    }

    pub fn avg_bytes(&self) -> u64 {
        if self.total_snapshots == 0 {
            0
        } else {
            self.total_bytes / self.total_snapshots
        }
    }
}
