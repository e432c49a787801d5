//! In-memory surface that records draw calls instead of rasterizing
//!
//! Clearing drops the previous frame's commands, so the recorder always holds
//! exactly what is "on screen".

use super::surface::{Glow, Stroke, Surface};
use crate::core::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: u32, height: u32 },
    Line { from: [f64; 2], to: [f64; 2], stroke: Stroke },
    Circle { center: [f64; 2], radius: f64, glow: Glow },
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Viewport,
    commands: Vec<DrawCommand>,
    /// Number of clears seen since creation
    clears: u64,
}

impl RecordingSurface {
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = (&[f64; 2], &[f64; 2], &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (&[f64; 2], f64, &Glow)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, glow } => Some((center, *radius, glow)),
            _ => None,
        })
    }

    pub fn clear_count(&self) -> u64 {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            width: self.size.width,
            height: self.size.height,
        });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: &Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke: *stroke });
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, glow: &Glow) {
        self.commands.push(DrawCommand::Circle { center, radius, glow: *glow });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::colors;

    #[test]
    fn test_clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new(Viewport::new(10, 10));
        let glow = Glow { color: colors::ACCENT, blur: 10.0 };

        surface.clear();
        surface.fill_circle([1.0, 1.0], 2.0, &glow);
        surface.fill_circle([2.0, 2.0], 2.0, &glow);
        assert_eq!(surface.commands().len(), 3);

        surface.clear();
        assert_eq!(surface.commands(), &[DrawCommand::Clear { width: 10, height: 10 }]);
        assert_eq!(surface.clear_count(), 2);
    }
}
