//! Drawing surface abstraction
//!
//! The field only needs four primitives; the browser backs them with a
//! `CanvasRenderingContext2d`, tests and the CLI with a command recorder.

use crate::core::Viewport;
use crate::theme::Rgb;

/// Stroke style for one connection line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub alpha: f64,
    pub width: f64,
}

/// Fill style for one node: solid colour plus a blurred shadow of the same colour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Rgb,
    pub blur: f64,
}

pub trait Surface {
    /// Current pixel size of the backing raster
    fn size(&self) -> Viewport;

    /// Resize the backing raster; contents may be discarded
    fn resize(&mut self, viewport: Viewport);

    /// Erase the whole raster
    fn clear(&mut self);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: &Stroke);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, glow: &Glow);
}
