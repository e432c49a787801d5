//! Error type shared by the field renderer, its hosts and the CLI

use std::fmt;

/// Errors raised while mounting or driving the neural field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The drawing surface (2D context) could not be obtained
    SurfaceUnavailable(String),
    /// The host refused to schedule or register a callback
    Scheduler(String),
    /// Configuration could not be parsed or holds invalid values
    Config(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceUnavailable(reason) => write!(f, "drawing surface unavailable: {}", reason),
            Self::Scheduler(reason) => write!(f, "frame scheduling failed: {}", reason),
            Self::Config(reason) => write!(f, "invalid field configuration: {}", reason),
        }
    }
}

impl std::error::Error for FieldError {}

#[cfg(target_arch = "wasm32")]
impl From<FieldError> for wasm_bindgen::JsValue {
    fn from(err: FieldError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failure() {
        let err = FieldError::SurfaceUnavailable("no 2d context".into());
        assert_eq!(err.to_string(), "drawing surface unavailable: no 2d context");

        let err = FieldError::Config("link_distance must be positive".into());
        assert!(err.to_string().contains("link_distance"));
    }
}
