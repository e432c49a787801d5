//! `Surface` backed by an HTML canvas 2D context

use std::f64::consts::TAU;

use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Glow, Stroke, Surface};
use crate::core::Viewport;
use crate::error::FieldError;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Obtain the 2D context of `canvas`
    pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, FieldError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| FieldError::SurfaceUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| FieldError::SurfaceUnavailable("2d context not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::SurfaceUnavailable("context is not 2d".into()))?;

        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: &Stroke) {
        self.ctx.begin_path();
        self.ctx.move_to(from[0], from[1]);
        self.ctx.line_to(to[0], to[1]);
        self.ctx.set_stroke_style_str(&stroke.color.rgba(stroke.alpha));
        self.ctx.set_line_width(stroke.width);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, glow: &Glow) {
        let color = glow.color.to_string();

        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center[0], center[1], radius, 0.0, TAU) {
            warn!(?e, "arc rejected");
            return;
        }
        self.ctx.set_fill_style_str(&color);
        self.ctx.set_shadow_color(&color);
        self.ctx.set_shadow_blur(glow.blur);
        self.ctx.fill();
        // Glow must not leak into the next frame's connection lines
        self.ctx.set_shadow_blur(0.0);
    }
}
