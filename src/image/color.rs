//! RGB to luminance conversion.
//!
//! Uses the BT.601 luma weights `Y = 0.299 R + 0.587 G + 0.114 B`, rounded
//! half up and clamped to `[0, 255]`.

use crate::image::OwnedImage;
use crate::util::{SimScoreError, SimScoreResult};

const WEIGHT_R: f64 = 0.299;
const WEIGHT_G: f64 = 0.587;
const WEIGHT_B: f64 = 0.114;

/// Converts one RGB triple to an 8-bit luma value.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let y = WEIGHT_R * r as f64 + WEIGHT_G * g as f64 + WEIGHT_B * b as f64 + 0.5;
    y.clamp(0.0, 255.0) as u8
}

/// Converts an interleaved 8-bit RGB buffer into a grayscale image.
///
/// Only the first `width * height * 3` bytes are read; a shorter buffer is an
/// error.
pub fn rgb_to_gray(rgb: &[u8], width: usize, height: usize) -> SimScoreResult<OwnedImage> {
    let pixels = width
        .checked_mul(height)
        .filter(|&n| n > 0)
        .ok_or(SimScoreError::InvalidDimensions { width, height })?;
    let needed = pixels
        .checked_mul(3)
        .ok_or(SimScoreError::InvalidDimensions { width, height })?;
    if rgb.len() < needed {
        return Err(SimScoreError::BufferTooSmall {
            needed,
            got: rgb.len(),
        });
    }

    let gray = rgb[..needed]
        .chunks_exact(3)
        .map(|px| luma_u8(px[0], px[1], px[2]))
        .collect();
    OwnedImage::new(gray, width, height)
}
