//! Time utilities for the simulation loop

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp in milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64
}

/// Server start time for uptime tracking
static SERVER_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize server start time (call once at startup)
pub fn init_server_time() {
    SERVER_START.get_or_init(Instant::now);
}

/// Get server uptime in seconds
pub fn uptime_secs() -> u64 {
    SERVER_START
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 20; // 20 ticks (and snapshots) per second
pub const TICK_DURATION_MICROS: u64 = 1_000_000 / SIMULATION_TPS as u64;

/// Largest delta a single tick may integrate, in seconds
pub const MAX_TICK_DELTA: f32 = 0.1;

/// Nominal period of the simulation timer
pub fn tick_interval() -> Duration {
    Duration::from_micros(TICK_DURATION_MICROS)
}

/// Convert wall-clock time since the previous tick into the delta used by
/// the simulation. A stall never produces more than `MAX_TICK_DELTA`.
pub fn clamp_tick_delta(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32().min(MAX_TICK_DELTA)
}

/// Tracks the instant of the previous tick
#[derive(Debug, Clone)]
pub struct TickClock {
    last: Instant,
}

impl TickClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(last: Instant) -> Self {
        Self { last }
    }

    /// Advance to `now` and return the clamped delta in seconds
    pub fn advance(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        clamp_tick_delta(elapsed)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
