//! Error types for transform operations.

use thiserror::Error;

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors that can occur while transforming a signal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The radix-2 FFT only accepts non-empty power-of-two lengths.
    #[error("invalid transform size {len}: must be a non-zero power of two")]
    InvalidSize { len: usize },

    /// A 2D transform was asked to work on a grid whose sides are not powers of two.
    #[error("invalid grid dimension {width}x{height}: both sides must be powers of two")]
    InvalidDimension { width: usize, height: usize },

    /// The backing buffer does not match the requested grid shape.
    #[error("shape mismatch: expected {expected} samples but got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}
