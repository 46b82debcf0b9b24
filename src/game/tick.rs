//! Authoritative tick loop: simulate, then broadcast

use std::time::Instant;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, trace};

use crate::util::time::{tick_interval, unix_millis, TickClock, SIMULATION_TPS};

use super::broadcast::{BroadcastReport, Broadcaster};
use super::sim::Simulator;
use super::snapshot::{SnapshotBuilder, SnapshotStats};

/// Ticks between periodic stats lines (one minute at the nominal rate)
const STATS_INTERVAL_TICKS: u64 = SIMULATION_TPS as u64 * 60;

/// Owns the simulator and the broadcaster. Each tick fully advances the
/// simulation before anything is serialized, and only this task ever
/// touches player state.
pub struct SimulationLoop {
    simulator: Simulator,
    broadcaster: Broadcaster,
    clock: TickClock,
    stats: SnapshotStats,
}

impl SimulationLoop {
    pub fn new(simulator: Simulator, broadcaster: Broadcaster) -> Self {
        Self {
            simulator,
            broadcaster,
            clock: TickClock::new(),
            stats: SnapshotStats::default(),
        }
    }

    /// Run the fixed-rate loop for the lifetime of the process
    pub async fn run(mut self) {
        info!(
            players = self.simulator.player_count(),
            tick_rate = SIMULATION_TPS,
            "Simulation loop started"
        );

        let mut ticker = interval(tick_interval());
        // Best effort cadence: a late tick is skipped, never bursted
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // Start measuring from the first real tick
        ticker.tick().await;
        self.clock = TickClock::new();

        loop {
            ticker.tick().await;
            self.tick(Instant::now());
        }
    }

    /// Run a single simulation tick and broadcast the result
    pub fn tick(&mut self, now: Instant) -> Option<BroadcastReport> {
        let dt = self.clock.advance(now);
        self.simulator.step(dt);

        let snapshot = SnapshotBuilder::build(unix_millis(), self.simulator.players());
        let report = match self.broadcaster.broadcast(&snapshot) {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "Failed to serialize snapshot");
                return None;
            }
        };

        self.stats.record(self.simulator.player_count(), report.bytes);
        trace!(
            tick = self.simulator.tick(),
            dt,
            delivered = report.delivered,
            "Broadcast snapshot"
        );

        if self.simulator.tick() % STATS_INTERVAL_TICKS == 0 {
            debug!(
                snapshots = self.stats.total_snapshots,
                avg_bytes = self.stats.avg_bytes(),
                avg_players = self.stats.avg_players_per_snapshot,
                connections = self.broadcaster.connection_count(),
                "Snapshot stats"
            );
        }

        Some(report)
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }
}
