//! WebSocket protocol message definitions
//! These are the wire types for server-to-client communication

use serde::{Deserialize, Serialize};

/// Team a player belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "T")]
    T,
    #[serde(rename = "CT")]
    CT,
}

impl Team {
    /// Alternate teams by spawn order, starting with T
    pub fn for_index(idx: usize) -> Self {
        if idx % 2 == 0 {
            Self::T
        } else {
            Self::CT
        }
    }
}

/// Player state in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: String,
    pub team: Team,
    /// Position X in world units
    pub x: f32,
    /// Position Y in world units
    pub y: f32,
    /// Heading in degrees, [0, 360)
    pub yaw: f32,
    pub alive: bool,
}

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Full player state, sent after every tick
    Players {
        /// Tick time, Unix millis
        timestamp: u64,
        players: Vec<PlayerSnapshot>,
    },
}

impl ServerMsg {
    /// Serialize into a text frame payload
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a text frame payload
    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
