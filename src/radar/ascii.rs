//! Character-grid canvas for terminal output

use std::fmt::Write as _;

use super::projection::ScreenPoint;
use super::render::{Canvas, Color, Stroke};

const EMPTY: char = ' ';
/// Glyph for fills whose color has no palette entry
const DEFAULT_FILL: char = '#';
/// Glyph for strokes whose color has no palette entry
const DEFAULT_STROKE: char = '.';

/// Cell layering: fills are never painted over by strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Empty,
    Stroke,
    Fill,
}

/// Rasterizes radar draw calls into a grid of characters.
///
/// Each cell covers a `width / cols` by `height / rows` block of pixels.
/// Terminal cells are about twice as tall as they are wide, so a square
/// surface usually maps to twice as many columns as rows.
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    width: u32,
    height: u32,
    cols: usize,
    rows: usize,
    cells: Vec<(char, Layer)>,
    palette: Vec<(Color, char)>,
}

impl AsciiCanvas {
    pub fn new(width: u32, height: u32, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            width,
            height,
            cols,
            rows,
            cells: vec![(EMPTY, Layer::Empty); cols * rows],
            palette: vec![
                (Color::OUTER_RING, 'o'),
                (Color::GUIDE, '.'),
                (Color::CT, 'C'),
                (Color::T, 'T'),
                (Color::HEADING, '*'),
            ],
        }
    }

    pub fn grid_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Character at a grid cell, if in range
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col].0)
        } else {
            None
        }
    }

    /// Grid cell containing a surface point, if on the surface
    pub fn cell_at(&self, p: ScreenPoint) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / self.cell_w()) as usize;
        let row = (p.y / self.cell_h()) as usize;
        (col < self.cols && row < self.rows).then_some((col, row))
    }

    pub fn render_to_string(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in self.cells.chunks(self.cols) {
            for (ch, _) in row {
                out.push(*ch);
            }
            out.push('\n');
        }
        out
    }

    /// Count cells showing `ch`
    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|(c, _)| *c == ch).count()
    }

    fn cell_w(&self) -> f32 {
        self.width as f32 / self.cols as f32
    }

    fn cell_h(&self) -> f32 {
        self.height as f32 / self.rows as f32
    }

    fn glyph(&self, color: Color, fallback: char) -> char {
        self.palette
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, g)| *g)
            .unwrap_or(fallback)
    }

    fn plot(&mut self, p: ScreenPoint, ch: char, layer: Layer) {
        if let Some((col, row)) = self.cell_at(p) {
            let cell = &mut self.cells[row * self.cols + col];
            if layer >= cell.1 {
                *cell = (ch, layer);
            }
        }
    }

    /// Sample count that visits every cell along a span of `len` pixels
    fn samples_for(&self, len: f32) -> usize {
        let finest = self.cell_w().min(self.cell_h()).max(f32::EPSILON);
        ((len / finest) * 2.0).ceil().max(1.0) as usize
    }
}

impl Canvas for AsciiCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.fill((EMPTY, Layer::Empty));
    }

    fn stroke_circle(&mut self, center: ScreenPoint, radius: f32, stroke: Stroke) {
        let ch = self.glyph(stroke.color, DEFAULT_STROKE);
        let n = self.samples_for(std::f32::consts::TAU * radius);
        for i in 0..n {
            let angle = std::f32::consts::TAU * i as f32 / n as f32;
            self.plot(center.offset_polar(angle, radius), ch, Layer::Stroke);
        }
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color) {
        let ch = self.glyph(color, DEFAULT_FILL);
        // Small markers may not cover any cell center, the center cell always counts
        self.plot(center, ch, Layer::Fill);

        let (cw, chh) = (self.cell_w(), self.cell_h());
        let min_col = ((center.x - radius) / cw).floor().max(0.0) as usize;
        let min_row = ((center.y - radius) / chh).floor().max(0.0) as usize;
        let max_col = ((center.x + radius) / cw).ceil().max(0.0) as usize;
        let max_row = ((center.y + radius) / chh).ceil().max(0.0) as usize;
        for row in min_row..=max_row.min(self.rows.saturating_sub(1)) {
            for col in min_col..=max_col.min(self.cols.saturating_sub(1)) {
                let cell_center = ScreenPoint::new((col as f32 + 0.5) * cw, (row as f32 + 0.5) * chh);
                let (dx, dy) = (cell_center.x - center.x, cell_center.y - center.y);
                if dx * dx + dy * dy <= radius * radius {
                    self.plot(cell_center, ch, Layer::Fill);
                }
            }
        }
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, stroke: Stroke) {
        let ch = self.glyph(stroke.color, DEFAULT_STROKE);
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let n = self.samples_for((dx * dx + dy * dy).sqrt());
        for i in 0..=n {
            let t = i as f32 / n as f32;
            self.plot(ScreenPoint::new(from.x + dx * t, from.y + dy * t), ch, Layer::Stroke);
        }
    }
}

/// Compose a full terminal frame: cursor home, grid, then status lines
pub fn terminal_frame(canvas: &AsciiCanvas, status: &str, detail: &str) -> String {
    let mut frame = String::from("\x1b[H\x1b[2J");
    frame.push_str(&canvas.render_to_string());
    let _ = writeln!(frame, "{}", status);
    let _ = writeln!(frame, "{}", detail);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::WorldBounds;
    use crate::radar::render::Radar;
    use crate::ws::protocol::{PlayerSnapshot, Team};

    fn canvas() -> AsciiCanvas {
        AsciiCanvas::new(400, 400, 80, 40)
    }

    #[test]
    fn cells_cover_the_surface() {
        let c = canvas();
        assert_eq!(c.size(), (400, 400));
        assert_eq!(c.grid_size(), (80, 40));
        assert_eq!(c.cell_at(ScreenPoint::new(200.0, 200.0)), Some((40, 20)));
        assert_eq!(c.cell_at(ScreenPoint::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(c.cell_at(ScreenPoint::new(400.0, 10.0)), None);
        assert_eq!(c.cell_at(ScreenPoint::new(-1.0, 10.0)), None);
    }

    #[test]
    fn empty_radar_shows_only_guides() {
        let radar = Radar::new(WorldBounds::default(), 400, 400);
        let mut c = canvas();
        radar.render(&mut c, &[]);

        assert!(c.count('o') > 0);
        assert!(c.count('.') > 0);
        assert_eq!(c.count('C'), 0);
        assert_eq!(c.count('T'), 0);
        assert_eq!(c.count('*'), 0);
    }

    #[test]
    fn players_are_drawn_over_the_crosshair() {
        let radar = Radar::new(WorldBounds::default(), 400, 400);
        let mut c = canvas();
        let players = [PlayerSnapshot {
            id: "p1".to_string(),
            team: Team::CT,
            x: 0.0,
            y: 0.0,
            yaw: 0.0,
            alive: true,
        }];
        radar.render(&mut c, &players);

        assert_eq!(c.cell(40, 20), Some('C'));
        // Heading runs 12px to the right, past the marker
        assert!(c.count('*') > 0);
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut c = canvas();
        c.fill_circle(ScreenPoint::new(50.0, 50.0), 20.0, Color::T);
        assert!(c.count('T') > 0);
        c.clear();
        assert_eq!(c.count(' '), 80 * 40);
    }

    #[test]
    fn unknown_colors_fall_back() {
        let mut c = canvas();
        c.fill_circle(ScreenPoint::new(10.0, 10.0), 1.0, Color::rgb(1, 2, 3));
        assert_eq!(c.cell(2, 1), Some('#'));
        c.line(
            ScreenPoint::new(100.0, 105.0),
            ScreenPoint::new(200.0, 105.0),
            Stroke::new(Color::rgb(9, 9, 9), 1.0),
        );
        assert_eq!(c.cell(30, 10), Some('.'));
    }

    #[test]
    fn frame_starts_with_cursor_home() {
        let frame = terminal_frame(&AsciiCanvas::new(10, 10, 2, 1), "Connected", "bounds");
        assert!(frame.starts_with("\x1b[H\x1b[2J"));
        assert!(frame.ends_with("Connected\nbounds\n"));
    }
}
