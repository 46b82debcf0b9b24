//! Radar drawing.
//!
//! The renderer does not depend on a graphics backend. It draws through
//! the [`Canvas`] trait, which a terminal, an image buffer or a test
//! recorder can implement.

use crate::game::WorldBounds;
use crate::ws::protocol::{PlayerSnapshot, Team};

use super::projection::{Projection, ScreenPoint};

/// Radius of a player marker, in pixels
pub const PLAYER_RADIUS: f32 = 5.0;
/// Length of the heading indicator, in pixels
pub const HEADING_LEN: f32 = 12.0;
/// Concentric guide rings drawn inside the outer circle
pub const GUIDE_RINGS: u32 = 3;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const OUTER_RING: Color = Color::rgba(0, 255, 153, 89);
    pub const GUIDE: Color = Color::rgba(0, 255, 153, 38);
    pub const CT: Color = Color::rgb(0x34, 0xd3, 0x99);
    pub const T: Color = Color::rgb(0xf8, 0x71, 0x71);
    pub const HEADING: Color = Color::rgb(0xe5, 0xe7, 0xeb);

    pub fn for_team(team: Team) -> Self {
        match team {
            Team::CT => Self::CT,
            Team::T => Self::T,
        }
    }
}

/// Line color and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A 2D drawing surface
pub trait Canvas {
    /// Surface size in pixels
    fn size(&self) -> (u32, u32);
    fn clear(&mut self);
    fn stroke_circle(&mut self, center: ScreenPoint, radius: f32, stroke: Stroke);
    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color);
    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, stroke: Stroke);
}

/// Draws player snapshots onto a circular radar
#[derive(Debug, Clone)]
pub struct Radar {
    projection: Projection,
}

impl Radar {
    pub fn new(bounds: WorldBounds, width: u32, height: u32) -> Self {
        Self {
            projection: Projection::new(bounds, width, height),
        }
    }

    /// Redraw the whole surface: guide first, then every live player
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, players: &[PlayerSnapshot]) {
        self.draw_background(canvas);
        self.draw_players(canvas, players);
    }

    fn draw_background<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let center = self.projection.center();
        let radius = self.projection.radius();

        canvas.clear();
        canvas.stroke_circle(center, radius, Stroke::new(Color::OUTER_RING, 2.0));

        let guide = Stroke::new(Color::GUIDE, 1.0);
        let step = radius / (GUIDE_RINGS + 1) as f32;
        for ring in 1..=GUIDE_RINGS {
            canvas.stroke_circle(center, step * ring as f32, guide);
        }

        canvas.line(
            ScreenPoint::new(center.x - radius, center.y),
            ScreenPoint::new(center.x + radius, center.y),
            guide,
        );
        canvas.line(
            ScreenPoint::new(center.x, center.y - radius),
            ScreenPoint::new(center.x, center.y + radius),
            guide,
        );
    }

    fn draw_players<C: Canvas + ?Sized>(&self, canvas: &mut C, players: &[PlayerSnapshot]) {
        let heading = Stroke::new(Color::HEADING, 1.5);
        for p in players.iter().filter(|p| p.alive) {
            let pos = self.projection.world_to_radar(p.x, p.y);
            canvas.fill_circle(pos, PLAYER_RADIUS, Color::for_team(p.team));
            // Heading is a plain screen-space vector, not run through the projection
            let tip = pos.offset_polar(p.yaw.to_radians(), HEADING_LEN);
            canvas.line(pos, tip, heading);
        }
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    StrokeCircle {
        center: ScreenPoint,
        radius: f32,
        stroke: Stroke,
    },
    FillCircle {
        center: ScreenPoint,
        radius: f32,
        color: Color,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        stroke: Stroke,
    },
}

/// Canvas that records draw calls instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Filled circles drawn since the last clear
    pub fn fills(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillCircle { .. }))
    }
}

impl Canvas for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f32, stroke: Stroke) {
        self.commands.push(DrawCmd::StrokeCircle { center, radius, stroke });
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color) {
        self.commands.push(DrawCmd::FillCircle { center, radius, color });
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, stroke: Stroke) {
        self.commands.push(DrawCmd::Line { from, to, stroke });
    }
}
