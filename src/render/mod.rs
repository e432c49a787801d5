//! Field rendering: the renderer itself and the surfaces it can draw on

mod field;
mod recorder;
mod surface;

#[cfg(target_arch = "wasm32")]
mod canvas;

pub use field::FieldRenderer;
pub use recorder::{DrawCommand, RecordingSurface};
pub use surface::{Glow, Stroke, Surface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
