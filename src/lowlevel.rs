//! Building blocks behind the high-level scoring functions.
//!
//! Useful for callers that want intermediate values (pairwise IoUs, SSIM
//! moments, per-row nearest neighbors) or to assemble their own pipeline.

pub use crate::dedup::iou_matrix;
pub use crate::image::color::luma_u8;
pub use crate::kernel::scalar::{nearest, nearest_neighbors};
pub use crate::kernel::{DistanceKernel, Hamming, Nearest, L2};
pub use crate::ssim::{SsimStats, C1, C2, DYNAMIC_RANGE};

#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::nearest_neighbors_par;
