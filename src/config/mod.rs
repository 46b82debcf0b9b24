//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::game::world::{MapInfo, WorldBounds};

/// Default listening port when `PORT` is absent
pub const DEFAULT_PORT: u16 = 3000;
/// Default number of simulated players
pub const DEFAULT_PLAYER_COUNT: usize = 5;
/// Default map name advertised by `/api/map`
pub const DEFAULT_MAP_NAME: &str = "de_demo";

/// Server configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Number of simulated players
    pub player_count: usize,
    /// Fixed RNG seed for reproducible simulations
    pub sim_seed: Option<u64>,
    /// Map metadata served to clients
    pub map: MapInfo,
    /// Directory served as a static fallback (the browser radar, usually)
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let player_count: usize = parse_or(&lookup, "PLAYER_COUNT", DEFAULT_PLAYER_COUNT)?;
        if player_count == 0 {
            return Err(ConfigError::Invalid("PLAYER_COUNT"));
        }

        let sim_seed = match lookup("SIM_SEED") {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::Invalid("SIM_SEED"))?),
            None => None,
        };

        Ok(Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            player_count,
            sim_seed,
            map: MapInfo {
                name: lookup("MAP_NAME").unwrap_or_else(|| DEFAULT_MAP_NAME.to_string()),
                world_bounds: WorldBounds::default(),
            },
            static_dir: lookup("STATIC_DIR").map(PathBuf::from),
        })
    }
}

/// Radar client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base HTTP URL of the radar server
    pub server_url: String,
    /// Redraw rate of the terminal display
    pub fps: u32,
    /// Width and height of the square drawing surface, in pixels
    pub surface_size: u32,
    /// Log level for stderr diagnostics
    pub log_level: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fps: u32 = parse_or(&lookup, "RADAR_FPS", 30)?;
        if fps == 0 {
            return Err(ConfigError::Invalid("RADAR_FPS"));
        }
        let surface_size: u32 = parse_or(&lookup, "RADAR_SIZE", 400)?;
        // The radar margin eats 8px on each side
        if surface_size <= 16 {
            return Err(ConfigError::Invalid("RADAR_SIZE"));
        }

        Ok(Self {
            server_url: lookup("RADAR_SERVER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://127.0.0.1:{}", DEFAULT_PORT)),
            fps,
            surface_size,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        })
    }

    /// URL of the map metadata endpoint
    pub fn map_url(&self) -> String {
        format!("{}/api/map", self.server_url)
    }

    /// URL of the push endpoint, with the scheme switched to ws/wss
    pub fn ws_url(&self) -> String {
        let base = if let Some(rest) = self.server_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.server_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            format!("ws://{}", self.server_url)
        };
        format!("{}/ws", base)
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
