//! Error types for the Retouch pipeline.

use thiserror::Error;

/// Errors raised by pixel buffer validation, filter parsing and edit sessions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetouchError {
    /// The pixel data does not describe a `width * height` RGBA image.
    #[error("Invalid dimensions: {width}x{height} image cannot hold {len} bytes of RGBA data")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// A filter tag is not one of grayscale, sepia, invert or blur.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// An adjustment name is not one of the eight supported adjustments.
    #[error("Unknown adjustment: {0}")]
    UnknownAdjustment(String),

    /// Undo was requested with an empty history.
    #[error("Nothing to undo")]
    NothingToUndo,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RetouchError>;
