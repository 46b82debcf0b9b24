//! Application state shared across routes

use std::sync::Arc;

use crate::config::Config;
use crate::game::{Broadcaster, MapInfo, SimulationLoop, Simulator};
use crate::ws::hub::ConnectionHub;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub map: Arc<MapInfo>,
    pub hub: Arc<ConnectionHub>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let map = Arc::new(config.map.clone());
        Self {
            config: Arc::new(config),
            map,
            hub: Arc::new(ConnectionHub::new()),
        }
    }

    /// Build the simulation loop that feeds this state's connections.
    /// The loop owns the simulator; routes only ever see the hub.
    pub fn simulation_loop(&self) -> SimulationLoop {
        let seed = self.config.sim_seed.unwrap_or_else(rand::random);
        let simulator = Simulator::new(self.config.player_count, seed);
        SimulationLoop::new(simulator, Broadcaster::new(self.hub.clone()))
    }
}
