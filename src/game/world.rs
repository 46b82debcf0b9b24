//! Static map metadata

use serde::{Deserialize, Serialize};

/// Rectangle of world space the players move within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl WorldBounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: -2500.0,
            min_y: -2500.0,
            max_x: 2500.0,
            max_y: 2500.0,
        }
    }
}

/// Map metadata returned by `GET /api/map`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInfo {
    pub name: String,
    pub world_bounds: WorldBounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_info_uses_camel_case_on_the_wire() {
        let map = MapInfo {
            name: "de_demo".to_string(),
            world_bounds: WorldBounds::default(),
        };
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["name"], "de_demo");
        assert_eq!(json["worldBounds"]["minX"], -2500.0);
        assert_eq!(json["worldBounds"]["maxY"], 2500.0);
    }
}
