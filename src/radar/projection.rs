//! World-to-screen projection for the circular radar

use crate::game::WorldBounds;

/// Pixels left between the radar circle and the surface edge
pub const RADAR_MARGIN: f32 = 8.0;

/// A point on the drawing surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point `len` pixels away along `angle_rad`
    pub fn offset_polar(&self, angle_rad: f32, len: f32) -> Self {
        Self {
            x: self.x + angle_rad.cos() * len,
            y: self.y + angle_rad.sin() * len,
        }
    }
}

/// Maps world coordinates onto a circle centered on the surface.
///
/// Each axis is normalized on its own, so non-square world bounds come out
/// stretched. The radar is stylized, not a faithful map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    bounds: WorldBounds,
    center: ScreenPoint,
    radius: f32,
}

impl Projection {
    pub fn new(bounds: WorldBounds, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            bounds,
            center: ScreenPoint::new(w / 2.0, h / 2.0),
            radius: w.min(h) / 2.0 - RADAR_MARGIN,
        }
    }

    pub fn center(&self) -> ScreenPoint {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn world_to_radar(&self, x: f32, y: f32) -> ScreenPoint {
        let b = &self.bounds;
        let nx = (x - b.min_x) / b.width() * 2.0 - 1.0;
        let ny = (y - b.min_y) / b.height() * 2.0 - 1.0;
        ScreenPoint::new(
            self.center.x + nx * self.radius,
            self.center.y + ny * self.radius,
        )
    }
}
