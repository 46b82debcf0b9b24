//! Game simulation modules

pub mod broadcast;
pub mod physics;
pub mod sim;
pub mod snapshot;
pub mod tick;
pub mod world;

pub use broadcast::Broadcaster;
pub use sim::{PlayerState, Simulator};
pub use tick::SimulationLoop;
pub use world::{MapInfo, WorldBounds};
