//! Radar projection and rendering

pub mod ascii;
pub mod projection;
pub mod render;

pub use ascii::AsciiCanvas;
pub use projection::{Projection, ScreenPoint};
pub use render::{Canvas, Color, DrawCmd, DrawList, Radar, Stroke};
