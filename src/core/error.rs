//! Errors raised when building motion parameters.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    #[error("smoothing factor must be in (0, 1], got {0}")]
    InvalidAlpha(f64),
    #[error("intensity scale must be finite and non-negative, got {0}")]
    InvalidIntensityScale(f64),
    #[error("parallax speed must be finite, got {0}")]
    InvalidParallaxSpeed(f64),
    #[error("frame rate must be between 1 and 240, got {0}")]
    InvalidFrameRate(u32),
}
