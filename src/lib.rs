//! Mini Radar - live entity radar
//!
//! - `game`: authoritative simulation and per-tick broadcast
//! - `ws` / `http`: WebSocket push endpoint and HTTP routes
//! - `radar`: world-to-screen projection and backend-agnostic drawing
//! - `client`: connection lifecycle and latest-snapshot store

pub mod app;
pub mod client;
pub mod config;
pub mod game;
pub mod http;
pub mod radar;
pub mod util;
pub mod ws;
