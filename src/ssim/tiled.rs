//! Block-wise SSIM over 2D views.

use crate::image::ImageView;
use crate::ssim::SsimStats;
use crate::trace::{enter_span, trace_event};
use crate::util::math::spans;
use crate::util::{SimScoreError, SimScoreResult};

/// Mean of per-block global SSIM scores over `tile × tile` blocks.
///
/// Blocks on the right and bottom edges are truncated to the image. This is a
/// coarse localized variant; it does not use Gaussian windows or overlapping
/// patches.
pub fn ssim_tiled(a: ImageView<'_, u8>, b: ImageView<'_, u8>, tile: usize) -> SimScoreResult<f64> {
    if tile == 0 {
        return Err(SimScoreError::InvalidInput("tile size must be positive"));
    }
    if a.width() != b.width() || a.height() != b.height() {
        return Err(SimScoreError::DimensionMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }

    enter_span!("ssim_tiled", tile = tile);
    let mut total = 0.0f64;
    let mut blocks = 0usize;
    for (y0, y1) in spans(a.height(), tile) {
        for (x0, x1) in spans(a.width(), tile) {
            let block_a = a.roi(x0, y0, x1 - x0, y1 - y0)?;
            let block_b = b.roi(x0, y0, x1 - x0, y1 - y0)?;
            total += SsimStats::from_views(block_a, block_b)?.score();
            blocks += 1;
        }
    }

    trace_event!("ssim_blocks", blocks = blocks);
    Ok(total / blocks as f64)
}
