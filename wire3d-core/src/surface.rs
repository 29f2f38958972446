//! Drawing surface abstraction consumed by the painter
use crate::color::Rgba;

/// The 2D path primitives a frame is drawn with
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> u32;
    /// Height in pixels
    fn height(&self) -> u32;
    /// Clear the whole surface and fill it with `color`
    fn clear(&mut self, color: Rgba);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);
    /// Fill the current path
    fn fill(&mut self, color: Rgba);
    /// Stroke the current path
    fn stroke(&mut self, color: Rgba, width: f32);
}

/// A single recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    ClosePath,
    Fill(Rgba),
    Stroke(Rgba, f32),
}

/// Surface that records every call instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn fills(&self) -> impl Iterator<Item = &Rgba> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill(color) => Some(color),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&Rgba, f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke(color, width) => Some((color, *width)),
            _ => None,
        })
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Stroke(color, width));
    }
}
