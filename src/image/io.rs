//! Image loading through the `image` crate.
//!
//! Available with the `image-io` feature. Color inputs are converted with
//! [`rgb_to_gray`] so decoded files and raw RGB buffers share one luma rule.

use crate::image::color::rgb_to_gray;
use crate::image::OwnedImage;
use crate::util::{SimScoreError, SimScoreResult};
use std::path::Path;

/// Converts a decoded image into a grayscale owned image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> SimScoreResult<OwnedImage> {
    match img {
        image::DynamicImage::ImageLuma8(gray) => OwnedImage::new(
            gray.as_raw().clone(),
            gray.width() as usize,
            gray.height() as usize,
        ),
        other => {
            let rgb = other.to_rgb8();
            rgb_to_gray(rgb.as_raw(), rgb.width() as usize, rgb.height() as usize)
        }
    }
}

/// Loads an image from disk as grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> SimScoreResult<OwnedImage> {
    let img = image::open(path).map_err(|err| SimScoreError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
