//! Error types for simscore.

use thiserror::Error;

/// Result alias for simscore operations.
pub type SimScoreResult<T> = std::result::Result<T, SimScoreError>;

/// Errors reported for contract violations.
///
/// Degenerate numeric cases (zero union area, zero SSIM denominator) and empty
/// box or descriptor inputs are not errors; they produce `0` or empty output.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimScoreError {
    /// Two sample buffers that must be compared element-wise differ in length.
    #[error("sample length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// An input that must be non-empty was empty.
    #[error("empty input: {context}")]
    EmptyInput { context: &'static str },
    /// Two images that must share dimensions do not.
    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },
    /// Width or height is zero or overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is too small for the requested layout.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Box geometry or score is not usable.
    #[error("invalid box: {reason}")]
    InvalidBox { reason: &'static str },
    /// A parameter is out of its accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Descriptor sets use different distance norms.
    #[error("descriptor norm mismatch: {left:?} vs {right:?}")]
    NormMismatch {
        left: crate::features::Norm,
        right: crate::features::Norm,
    },
    /// Descriptor rows have different widths.
    #[error("descriptor width mismatch: {left} vs {right}")]
    DescriptorWidthMismatch { left: usize, right: usize },
    /// Descriptor storage does not hold one row per keypoint.
    #[error("descriptor count mismatch: {keypoints} keypoints, {rows} rows")]
    DescriptorCountMismatch { keypoints: usize, rows: usize },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
