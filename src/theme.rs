//! Accent palette for the neural field
//!
//! The whole field is drawn in a single accent colour; connections reuse it
//! with a per-line alpha, nodes reuse it for both fill and glow.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Opaque 8-bit RGB colour, serialized as a `#RRGGBB` string
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub mod colors {
    use super::Rgb;

    /// Brand green used for nodes and connections
    pub const ACCENT: Rgb = Rgb::new(0, 168, 89); // #00A859
    pub const ACCENT_BRIGHT: Rgb = Rgb::new(0, 214, 116); // #00D674
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, FieldError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(FieldError::Config(format!("expected #RRGGBB colour, got {:?}", hex)));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| FieldError::Config(format!("invalid hex digits in {:?}", hex)))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS colour string with the given alpha, e.g. `rgba(0, 168, 89, 0.1)`
    pub fn rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}
