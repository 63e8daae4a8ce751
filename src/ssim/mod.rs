//! Whole-image structural similarity (SSIM).
//!
//! The score treats the full buffer as a single window: means, biased
//! variances and the covariance are taken over every sample, then combined as
//!
//! ```text
//! SSIM = ((2 μx μy + C1) (2 σxy + C2)) / ((μx² + μy² + C1) (σx² + σy² + C2))
//! ```
//!
//! with `L = 255`, `C1 = (0.01 L)²` and `C2 = (0.03 L)²`. A zero denominator
//! yields `0.0`. The result is not clamped. For a localized variant see
//! [`ssim_tiled`].

mod tiled;

use crate::image::ImageView;
use crate::trace::enter_span;
use crate::util::math::ratio_or_zero;
use crate::util::{SimScoreError, SimScoreResult};

pub use tiled::ssim_tiled;

/// Dynamic range of 8-bit samples.
pub const DYNAMIC_RANGE: f64 = 255.0;
/// Luminance stabilizer `(0.01 L)²`.
pub const C1: f64 = (0.01 * DYNAMIC_RANGE) * (0.01 * DYNAMIC_RANGE);
/// Contrast stabilizer `(0.03 L)²`.
pub const C2: f64 = (0.03 * DYNAMIC_RANGE) * (0.03 * DYNAMIC_RANGE);

/// First and second moments of a sample pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SsimStats {
    pub mean_x: f64,
    pub mean_y: f64,
    pub var_x: f64,
    pub var_y: f64,
    pub cov_xy: f64,
}

impl SsimStats {
    /// Computes moments of two equal-length, non-empty sample buffers.
    pub fn from_samples(a: &[u8], b: &[u8]) -> SimScoreResult<Self> {
        if a.len() != b.len() {
            return Err(SimScoreError::LengthMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        if a.is_empty() {
            return Err(SimScoreError::EmptyInput {
                context: "grayscale samples",
            });
        }
        Ok(Self::accumulate(a.len(), || {
            a.iter().copied().zip(b.iter().copied())
        }))
    }

    /// Computes moments of two views with identical dimensions.
    pub fn from_views(a: ImageView<'_, u8>, b: ImageView<'_, u8>) -> SimScoreResult<Self> {
        if a.width() != b.width() || a.height() != b.height() {
            return Err(SimScoreError::DimensionMismatch {
                left_width: a.width(),
                left_height: a.height(),
                right_width: b.width(),
                right_height: b.height(),
            });
        }
        Ok(Self::accumulate(a.pixel_count(), || {
            a.rows()
                .zip(b.rows())
                .flat_map(|(ra, rb)| ra.iter().copied().zip(rb.iter().copied()))
        }))
    }

    /// Two passes over the pairs produced by `pairs`: means, then centered sums.
    fn accumulate<F, I>(n: usize, pairs: F) -> Self
    where
        F: Fn() -> I,
        I: Iterator<Item = (u8, u8)>,
    {
        let count = n as f64;
        let (sum_x, sum_y) = pairs().fold((0.0f64, 0.0f64), |(sx, sy), (x, y)| {
            (sx + x as f64, sy + y as f64)
        });
        let mean_x = sum_x / count;
        let mean_y = sum_y / count;

        let mut vx = 0.0f64;
        let mut vy = 0.0f64;
        let mut vxy = 0.0f64;
        for (x, y) in pairs() {
            let dx = x as f64 - mean_x;
            let dy = y as f64 - mean_y;
            vx += dx * dx;
            vy += dy * dy;
            vxy += dx * dy;
        }

        Self {
            mean_x,
            mean_y,
            var_x: vx / count,
            var_y: vy / count,
            cov_xy: vxy / count,
        }
    }

    /// Combines the moments into the SSIM score.
    pub fn score(&self) -> f64 {
        let num = (2.0 * self.mean_x * self.mean_y + C1) * (2.0 * self.cov_xy + C2);
        let den = (self.mean_x * self.mean_x + self.mean_y * self.mean_y + C1)
            * (self.var_x + self.var_y + C2);
        ratio_or_zero(num, den)
    }
}

/// Global SSIM between two equal-length grayscale sample buffers.
///
/// Fails with [`SimScoreError::LengthMismatch`] when the lengths differ and
/// [`SimScoreError::EmptyInput`] when both buffers are empty.
pub fn ssim_global(a: &[u8], b: &[u8]) -> SimScoreResult<f64> {
    enter_span!("ssim_global", samples = a.len());
    SsimStats::from_samples(a, b).map(|stats| stats.score())
}

/// Global SSIM between two views of identical dimensions.
///
/// Equivalent to [`ssim_global`] on the packed pixels; row padding is skipped.
pub fn ssim_views(a: ImageView<'_, u8>, b: ImageView<'_, u8>) -> SimScoreResult<f64> {
    SsimStats::from_views(a, b).map(|stats| stats.score())
}
