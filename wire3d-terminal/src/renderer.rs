//! ASCII rasterizer that implements the core drawing surface
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Rgb, Rgba, Surface};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Segments reaching further than this many cells off-grid are not stroked
const MAX_CELL_EXTENT: f32 = (1 << 20) as f32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Rgb,
}

/// Terminal surface: a logical pixel canvas mapped onto a grid of cells.
///
/// Paths are kept in canvas pixels and scaled to cells when filled or
/// stroked, so the painter sees the same canvas size as any other surface.
pub struct AsciiSurface {
    width: u32,
    height: u32,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    background: Rgb,
    path: Vec<(f32, f32)>,
    closed: bool,
}

impl AsciiSurface {
    pub fn new(width: u32, height: u32, cols: usize, rows: usize) -> Self {
        let background = Rgb::new(0, 0, 0);
        Self {
            width,
            height,
            cols,
            rows,
            cells: vec![Cell { glyph: ' ', color: background }; cols * rows],
            background,
            path: Vec::new(),
            closed: false,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell { glyph: ' ', color: self.background }; cols * rows];
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Rows of glyphs, mostly useful for snapshots and tests
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect()
    }

    /// No canvas area or no cells: nothing can be drawn
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.cols == 0 || self.rows == 0
    }

    fn to_cell_space(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (
            x * self.cols as f32 / self.width as f32,
            y * self.rows as f32 / self.height as f32,
        )
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return;
        }
        let idx = y as usize * self.cols + x as usize;
        let cell = &mut self.cells[idx];
        cell.glyph = glyph;
        cell.color = blend(cell.color, color);
    }

    fn rasterize_triangle(&mut self, v: [(f32, f32); 3], glyph: char, color: Rgba) {
        let [v0, v1, v2] = v;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.cols as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.rows as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, glyph, color);
                    }
                }
            }
        }
    }

    fn rasterize_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba, width: f32) {
        if ![from.0, from.1, to.0, to.1]
            .iter()
            .all(|v| v.is_finite() && v.abs() <= MAX_CELL_EXTENT)
        {
            return;
        }
        let glyph = line_glyph(from, to, width);
        let (mut x0, mut y0) = (from.0.floor() as i32, from.1.floor() as i32);
        let (x1, y1) = (to.0.floor() as i32, to.1.floor() as i32);

        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, glyph, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.draw_at(writer, 0)
    }

    /// Draw with the first cell row placed on terminal row `top`
    pub fn draw_at<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current: Option<Rgb> = None;
        for (y, row) in self.cells.chunks(self.cols.max(1)).enumerate() {
            writer.queue(cursor::MoveTo(0, top.saturating_add(y as u16)))?;
            for cell in row {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(to_terminal_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba) {
        self.background = color.rgb();
        for cell in &mut self.cells {
            cell.glyph = ' ';
            cell.color = self.background;
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.closed = false;
    }

    fn move_to(&mut self, x: f32, y: f32) {
        // One subpath per path is all the painter emits
        self.path.clear();
        self.path.push((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push((x, y));
    }

    fn close_path(&mut self) {
        self.closed = true;
    }

    fn fill(&mut self, color: Rgba) {
        if self.is_empty() || self.path.len() < 3 {
            return;
        }
        let glyph = shade_glyph(color);
        let points: Vec<_> = self.path.iter().map(|&p| self.to_cell_space(p)).collect();

        // Fan triangulation; the painter only produces convex faces
        for i in 1..points.len() - 1 {
            self.rasterize_triangle([points[0], points[i], points[i + 1]], glyph, color);
        }
    }

    fn stroke(&mut self, color: Rgba, width: f32) {
        if self.is_empty() {
            return;
        }
        let points: Vec<_> = self.path.iter().map(|&p| self.to_cell_space(p)).collect();
        for pair in points.windows(2) {
            self.rasterize_line(pair[0], pair[1], color, width);
        }
        if self.closed && points.len() > 2 {
            self.rasterize_line(points[points.len() - 1], points[0], color, width);
        }
    }
}

/// Glyph for a filled cell, picked from the ramp by the fill's brightness
fn shade_glyph(color: Rgba) -> char {
    let brightness = color.rgb().luminance() * color.a;
    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.clamp(1, LUMINOSITY_RAMP.len() - 1)]
}

/// Glyph that follows the direction of a stroked segment
fn line_glyph(from: (f32, f32), to: (f32, f32), width: f32) -> char {
    if width >= 2.0 {
        return '#';
    }
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

fn blend(under: Rgb, over: Rgba) -> Rgb {
    let a = over.a.clamp(0.0, 1.0);
    let mix = |u: u8, o: u8| (u as f32 * (1.0 - a) + o as f32 * a).round() as u8;
    Rgb::new(mix(under.r, over.r), mix(under.g, over.g), mix(under.b, over.b))
}

fn to_terminal_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    // Degenerate (zero-area) triangles cover nothing
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
