//! Error types for slidematch.

use thiserror::Error;

/// Result alias for slidematch operations.
pub type SlideMatchResult<T> = std::result::Result<T, SlideMatchError>;

/// Errors reported when a matching precondition is violated.
///
/// Every fallible call fails as a whole: no partial surface or peak list is
/// returned alongside an error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SlideMatchError {
    /// A grid has zero rows or zero columns.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Rows of a nested grid have different lengths.
    #[error("ragged rows: row {row} has {got} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// The backing buffer is shorter than the described grid.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The pattern does not fit inside the image for the requested placement mode.
    #[error(
        "pattern {pattern_width}x{pattern_height} does not fit image {img_width}x{img_height}"
    )]
    PatternTooLarge {
        pattern_width: usize,
        pattern_height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A single window anchored at `(row, col)` leaves the image.
    #[error(
        "window {width}x{height} at (row {row}, col {col}) exceeds image {img_width}x{img_height}"
    )]
    WindowOutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The boundary strategy name is not recognised for this entry point.
    #[error("unknown boundary strategy {name:?}")]
    UnknownStrategy { name: String },
    /// The metric name is not recognised.
    #[error("unknown metric {name:?}")]
    UnknownMetric { name: String },
    /// More peaks were requested than the surface has cells.
    #[error("requested {requested} peaks from a surface of {available} cells")]
    TooManyPeaks { requested: usize, available: usize },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image decoding or encoding failed.
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
}
