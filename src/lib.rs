//! SimScore decides whether two images, or two regions, show the same content.
//!
//! Three independent scoring primitives are provided:
//!
//! - [`deduplicate`]: greedy IoU non-maximum suppression over scored boxes;
//! - [`ssim_global`]: whole-buffer structural similarity of two grayscale
//!   sample sequences;
//! - [`match_descriptors`]: brute-force nearest-neighbor descriptor matching
//!   with optional cross-check.
//!
//! Keypoint detection is left to a [`FeatureExtractor`] implementation. The
//! `rayon` feature enables parallel paths that return the same results as the
//! sequential ones, `tracing` emits spans, and `image-io` adds file loading.

pub mod dedup;
pub mod features;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod ssim;
mod trace;
pub mod util;

pub use dedup::{deduplicate, deduplicate_indices, iou, BBox, DedupConfig, Deduplicator};
pub use features::{
    match_descriptors, match_images, DescriptorMatcher, DescriptorSet, Descriptors,
    FeatureExtractor, ImageMatches, Keypoint, Match, MatcherConfig, Norm,
};
pub use crate::image::color::rgb_to_gray;
#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{ImageView, OwnedImage};
pub use ssim::{ssim_global, ssim_tiled, ssim_views};
pub use util::{SimScoreError, SimScoreResult};
