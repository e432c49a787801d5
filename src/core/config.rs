//! Field tunables
//!
//! Defaults reproduce the stock background: one node per 15 000 px², drift
//! speed up to 0.25 px/frame, links fading out at 150 px.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::theme::{colors, Rgb};

/// Surface area (px²) that earns one node
pub const AREA_PER_NODE: f64 = 15_000.0;
/// Maximum per-axis drift speed in px/frame
pub const MAX_SPEED: f64 = 0.25;
/// Distance at which a connection fades out completely
pub const LINK_DISTANCE: f64 = 150.0;
/// Opacity of a connection between coincident nodes
pub const LINK_ALPHA: f64 = 0.3;
pub const LINK_WIDTH: f64 = 1.0;
pub const NODE_RADIUS: f64 = 2.0;
pub const GLOW_BLUR: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub area_per_node: f64,
    pub max_speed: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub node_radius: f64,
    pub glow_blur: f64,
    pub accent: Rgb,
    /// Fixed RNG seed; `None` draws one from the platform entropy source
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_node: AREA_PER_NODE,
            max_speed: MAX_SPEED,
            link_distance: LINK_DISTANCE,
            link_alpha: LINK_ALPHA,
            link_width: LINK_WIDTH,
            node_radius: NODE_RADIUS,
            glow_blur: GLOW_BLUR,
            accent: colors::ACCENT,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FieldError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        let positive = [
            ("area_per_node", self.area_per_node),
            ("link_distance", self.link_distance),
            ("link_width", self.link_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FieldError::Config(format!("{} must be positive, got {}", name, value)));
            }
        }

        let non_negative = [
            ("max_speed", self.max_speed),
            ("node_radius", self.node_radius),
            ("glow_blur", self.glow_blur),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FieldError::Config(format!("{} must be >= 0, got {}", name, value)));
            }
        }

        if !(0.0..=1.0).contains(&self.link_alpha) {
            return Err(FieldError::Config(format!(
                "link_alpha must be within [0, 1], got {}",
                self.link_alpha
            )));
        }

        Ok(())
    }
}
