//! Error types for drawing and serialization

use thiserror::Error;

/// A gradient paint that cannot be expressed as an SVG gradient.
///
/// This indicates a bug in the code that built the paint, so it is raised
/// when the paint is first applied and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGradientError {
    #[error("gradient needs at least 2 color stops, found {count}")]
    TooFewStops { count: usize },

    #[error("color stop {index} has offset {offset}, expected a value in [0, 1]")]
    OffsetOutOfRange { index: usize, offset: f64 },

    #[error("color stop {index} has offset {offset}, which is less than the previous offset {previous}")]
    OffsetsOutOfOrder {
        index: usize,
        offset: f64,
        previous: f64,
    },

    #[error("radial gradient radius must be positive and finite, found {radius}")]
    InvalidRadius { radius: f64 },
}

/// Errors raised while encoding an embedded raster image
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("no image writer registered for MIME type '{0}'")]
    UnsupportedMimeType(String),
}

/// Errors surfaced by drawing calls and document serialization
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid gradient: {0}")]
    InvalidGradient(#[from] InvalidGradientError),

    #[error("image encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("failed to write SVG: {0}")]
    Io(#[from] std::io::Error),
}
