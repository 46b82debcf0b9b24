//! Authoritative player simulation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::util::time::MAX_TICK_DELTA;
use crate::ws::protocol::{PlayerSnapshot, Team};

use super::physics::{wrap_degrees, MovementConfig, PhysicsSystem};

/// Half-width of the square players spawn in
const SPAWN_SPREAD: f32 = 1500.0;

/// Player state in the simulation (authoritative)
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub id: String,
    pub team: Team,
    pub x: f32,
    pub y: f32,
    /// Heading in degrees, always within [0, 360)
    pub yaw: f32,
    pub alive: bool,
}

impl PlayerState {
    pub fn new(id: String, team: Team, x: f32, y: f32, yaw: f32) -> Self {
        Self {
            id,
            team,
            x,
            y,
            yaw: wrap_degrees(yaw),
            alive: true,
        }
    }

    pub fn to_snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id.clone(),
            team: self.team,
            x: self.x,
            y: self.y,
            yaw: self.yaw,
            alive: self.alive,
        }
    }
}

/// Owns every player and advances them once per tick
pub struct Simulator {
    players: Vec<PlayerState>,
    movement: MovementConfig,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Simulator {
    /// Spawn `count` players at random positions and headings
    pub fn new(count: usize, seed: u64) -> Self {
        Self::with_movement(count, seed, MovementConfig::default())
    }

    pub fn with_movement(count: usize, seed: u64, movement: MovementConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let players = (0..count)
            .map(|idx| {
                let x = rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD);
                let y = rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD);
                let yaw = rng.gen_range(0.0..360.0);
                PlayerState::new(format!("p{}", idx + 1), Team::for_index(idx), x, y, yaw)
            })
            .collect();

        Self {
            players,
            movement,
            rng,
            tick: 0,
        }
    }

    /// Advance every player by `dt` seconds. Deltas beyond the per-tick
    /// maximum are clamped, so a stall never teleports anyone.
    ///
    /// Returns the delta actually integrated.
    pub fn step(&mut self, dt: f32) -> f32 {
        let dt = dt.clamp(0.0, MAX_TICK_DELTA);
        let max_jitter = self.movement.max_turn_jitter;

        for player in &mut self.players {
            let jitter = if max_jitter > 0.0 {
                self.rng.gen_range(-max_jitter..max_jitter)
            } else {
                0.0
            };
            PhysicsSystem::advance_player(player, dt, jitter, &self.movement);
        }

        self.tick += 1;
        dt
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    /// Number of ticks simulated so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
