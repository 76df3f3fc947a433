//! Drawing surface capability.

use crate::assets::{AssetKind, Sprite};
use crate::config::Stroke;
use crate::models::Position;

/// Something frames can be drawn onto.
///
/// Coordinates are surface pixels with the origin in the top-left corner.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Erase everything.
    fn clear(&mut self);

    /// Draw `sprite` scaled into the rectangle at `(x, y)` of `width` x `height`.
    fn draw_image(&mut self, sprite: &Sprite, x: f64, y: f64, width: f64, height: f64);

    /// Draw a straight segment.
    fn draw_line(&mut self, from: Position, to: Position, stroke: Stroke);

    /// Called once a frame is complete.
    fn present(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Image {
        kind: AssetKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        from: Position,
        to: Position,
        stroke: Stroke,
    },
    Present,
}

/// Surface that remembers what was drawn instead of drawing it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands grouped per frame; each frame starts at a `Clear`.
    pub fn frames(&self) -> Vec<&[DrawCommand]> {
        let mut frames = Vec::new();
        let mut start = None;
        for (i, command) in self.commands.iter().enumerate() {
            if *command == DrawCommand::Clear {
                if let Some(s) = start {
                    frames.push(&self.commands[s..i]);
                }
                start = Some(i);
            }
        }
        if let Some(s) = start {
            frames.push(&self.commands[s..]);
        }
        frames
    }

    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| **c == DrawCommand::Clear)
            .count()
    }

    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames().pop()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, sprite: &Sprite, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Image {
            kind: sprite.kind,
            x,
            y,
            width,
            height,
        });
    }

    fn draw_line(&mut self, from: Position, to: Position, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}
