//! Neural field - animated node-graph background
//!
//! Drifting nodes bounce around a canvas sized to the viewport; every pair
//! closer than 150px is joined by a line that fades with distance.
//!
//! - `core`: platform-agnostic simulation (nodes, physics, connections, config)
//! - `render`: the field renderer and its drawing surfaces
//! - `animation`: Stopped/Running lifecycle driven by a frame-scheduling host
//! - `web` (wasm32): `requestAnimationFrame` host and the `NeuralBackground` JS handle

pub mod animation;
pub mod confetti;
pub mod core;
pub mod error;
pub mod headless;
pub mod progress;
pub mod render;
pub mod stats;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod web;

pub use crate::animation::{FieldLoop, Host, LoopState};
pub use crate::confetti::ConfettiBurst;
pub use crate::core::{FieldConfig, Node, NodeSet, Viewport};
pub use crate::error::FieldError;
pub use crate::headless::{HeadlessHost, RunTiming};
pub use crate::render::{FieldRenderer, RecordingSurface, Surface};

#[cfg(target_arch = "wasm32")]
pub use crate::web::{
    confetti_burst_json, progress_particles_json, progress_percentage, progress_steps_json,
    NeuralBackground,
};
