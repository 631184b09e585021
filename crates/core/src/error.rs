//! Error types for the wave-field core.

use thiserror::Error;

/// Errors produced by wave-field operations.
#[derive(Debug, Error)]
pub enum WaveError {
    /// A viewport or image size was negative, not finite, or too large.
    #[error("invalid dimensions: width and height must be finite, non-negative and within limits")]
    InvalidDimensions,

    /// A configuration option is outside its accepted range.
    #[error("invalid config option '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The host environment refused a request (frame scheduling, DOM access).
    #[error("host error: {0}")]
    Host(String),

    /// An I/O failure while writing a snapshot or reading a seed file.
    #[error("I/O error: {0}")]
    Io(String),
}

impl WaveError {
    /// Shorthand for [`WaveError::InvalidConfig`].
    pub fn config(name: &str, reason: impl Into<String>) -> Self {
        WaveError::InvalidConfig {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
