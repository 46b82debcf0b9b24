//! Radar client: connection lifecycle and snapshot intake

pub mod connection;
pub mod session;
pub mod snapshot;

pub use connection::{Connection, ConnectionState};
pub use session::{fetch_map, run_connection, ClientError};
pub use snapshot::SnapshotStore;
