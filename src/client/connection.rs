//! Client connection lifecycle

use tokio::sync::watch;
use tracing::info;

use crate::game::MapInfo;

/// Lifecycle of the single push connection. `Closed` is terminal: there
/// is no reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    /// Status line shown under the radar
    pub fn status_text(&self, map: &MapInfo) -> String {
        match self {
            Self::Connecting => {
                let b = &map.world_bounds;
                format!(
                    "{} bounds: {},{} to {},{}",
                    map.name, b.min_x, b.min_y, b.max_x, b.max_y
                )
            }
            Self::Open => format!("Connected \u{2022} {}", map.name),
            Self::Closed => "Disconnected".to_string(),
        }
    }
}

/// Connection state holder. Subscribers are woken on every transition.
pub struct Connection {
    state: watch::Sender<ConnectionState>,
}

impl Connection {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ConnectionState::Connecting);
        Self { state }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// `Connecting -> Open`. Returns false if the transition is not allowed.
    pub fn mark_open(&self) -> bool {
        self.transition(|from| matches!(from, ConnectionState::Connecting), ConnectionState::Open)
    }

    /// `Connecting | Open -> Closed`
    pub fn mark_closed(&self) -> bool {
        self.transition(|from| !matches!(from, ConnectionState::Closed), ConnectionState::Closed)
    }

    fn transition<F>(&self, allowed: F, to: ConnectionState) -> bool
    where
        F: Fn(ConnectionState) -> bool,
    {
        let changed = self.state.send_if_modified(|state| {
            if allowed(*state) {
                *state = to;
                true
            } else {
                false
            }
        });
        if changed {
            info!(state = ?to, "Connection state changed");
        }
        changed
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}
