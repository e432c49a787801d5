//! Submission confetti burst
//!
//! A single burst of 100 round pieces dropped from just above the top edge,
//! each in one of three accent shades, each falling for 2-5 seconds. The
//! whole burst is removed 5 seconds after it was spawned.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::theme::{colors, Rgb};

pub const CONFETTI_COUNT: usize = 100;
pub const CONFETTI_PALETTE: [Rgb; 3] = [colors::ACCENT, colors::ACCENT_BRIGHT, colors::WHITE];
/// Diameter in px
pub const CONFETTI_SIZE: f64 = 10.0;
/// Pieces start one diameter above the viewport
pub const CONFETTI_START_Y: f64 = -CONFETTI_SIZE;
pub const MIN_FALL_SECS: f64 = 2.0;
pub const MAX_FALL_SECS: f64 = 5.0;
pub const BURST_LIFETIME_SECS: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Confetti {
    pub color: Rgb,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    /// Duration of the linear fall animation
    pub fall_secs: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConfettiBurst {
    pub pieces: Vec<Confetti>,
    /// Time the burst was spawned, in seconds on the caller's clock
    pub spawned_at: f64,
}

impl ConfettiBurst {
    /// Scatter a burst across a viewport `viewport_width` px wide
    pub fn spawn(viewport_width: f64, spawned_at: f64, rng: &mut impl Rng) -> Self {
        let width = if viewport_width.is_finite() { viewport_width.max(0.0) } else { 0.0 };

        let pieces = (0..CONFETTI_COUNT)
            .map(|_| Confetti {
                color: *CONFETTI_PALETTE.choose(rng).unwrap_or(&colors::ACCENT),
                x: if width > 0.0 { rng.gen_range(0.0..width) } else { 0.0 },
                y: CONFETTI_START_Y,
                size: CONFETTI_SIZE,
                fall_secs: rng.gen_range(MIN_FALL_SECS..MAX_FALL_SECS),
            })
            .collect();

        Self { pieces, spawned_at }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// True once the burst should be taken off screen
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.spawned_at >= BURST_LIFETIME_SECS
    }
}
