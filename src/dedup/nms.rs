//! Greedy non-maximum suppression by IoU.

use std::cmp::Ordering;

use crate::dedup::{iou, BBox};
use crate::trace::{enter_span, trace_event};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Configuration for [`Deduplicator`].
#[derive(Clone, Copy, Debug)]
pub struct DedupConfig {
    /// A candidate is dropped when its IoU with a kept box exceeds this value.
    pub iou_threshold: f64,
    /// Precompute pairwise IoUs in parallel before the greedy pass.
    ///
    /// Only effective with the `rayon` feature; results are identical either way.
    pub parallel: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            parallel: false,
        }
    }
}

/// Reusable box deduplicator.
#[derive(Clone, Debug, Default)]
pub struct Deduplicator {
    cfg: DedupConfig,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, cfg: DedupConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &DedupConfig {
        &self.cfg
    }

    /// Returns the retained boxes in selection order.
    pub fn run(&self, boxes: &[BBox]) -> Vec<BBox> {
        self.run_indices(boxes)
            .into_iter()
            .map(|idx| boxes[idx])
            .collect()
    }

    /// Returns indices into `boxes` of the retained boxes in selection order.
    pub fn run_indices(&self, boxes: &[BBox]) -> Vec<usize> {
        enter_span!("dedup", boxes = boxes.len());
        let threshold = self.cfg.iou_threshold;

        #[cfg(feature = "rayon")]
        let kept = if self.cfg.parallel {
            let n = boxes.len();
            let matrix = iou_matrix(boxes);
            select_greedy(boxes, threshold, |a, b| matrix[a * n + b])
        } else {
            select_greedy(boxes, threshold, |a, b| iou(&boxes[a], &boxes[b]))
        };
        #[cfg(not(feature = "rayon"))]
        let kept = select_greedy(boxes, threshold, |a, b| iou(&boxes[a], &boxes[b]));

        trace_event!("dedup_kept", kept = kept.len(), dropped = boxes.len() - kept.len());
        kept
    }
}

/// Deduplicates `boxes`, keeping the highest-scoring box of each overlap cluster.
///
/// Boxes are visited by descending score (equal scores keep input order). A
/// box is kept unless its IoU with an already kept box is strictly greater
/// than `iou_threshold`. The input slice is left untouched.
pub fn deduplicate(boxes: &[BBox], iou_threshold: f64) -> Vec<BBox> {
    Deduplicator::new()
        .with_config(DedupConfig {
            iou_threshold,
            ..DedupConfig::default()
        })
        .run(boxes)
}

/// Same selection as [`deduplicate`], returned as indices into `boxes`.
pub fn deduplicate_indices(boxes: &[BBox], iou_threshold: f64) -> Vec<usize> {
    Deduplicator::new()
        .with_config(DedupConfig {
            iou_threshold,
            ..DedupConfig::default()
        })
        .run_indices(boxes)
}

/// Row-major `n × n` matrix of pairwise IoUs.
///
/// Rows are filled in parallel when the `rayon` feature is enabled.
pub fn iou_matrix(boxes: &[BBox]) -> Vec<f64> {
    let n = boxes.len();
    let mut out = vec![0.0f64; n * n];
    if n == 0 {
        return out;
    }

    let fill_row = |(i, row): (usize, &mut [f64])| {
        for (j, value) in row.iter_mut().enumerate() {
            *value = iou(&boxes[i], &boxes[j]);
        }
    };

    #[cfg(feature = "rayon")]
    out.par_chunks_mut(n).enumerate().for_each(fill_row);
    #[cfg(not(feature = "rayon"))]
    out.chunks_mut(n).enumerate().for_each(fill_row);

    out
}

/// Input indices ordered by descending score; the sort is stable.
fn score_order(boxes: &[BBox]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| {
        boxes[b]
            .score()
            .partial_cmp(&boxes[a].score())
            .unwrap_or(Ordering::Equal)
    });
    order
}

fn select_greedy<F>(boxes: &[BBox], threshold: f64, overlap: F) -> Vec<usize>
where
    F: Fn(usize, usize) -> f64,
{
    let mut kept: Vec<usize> = Vec::new();

    'outer: for idx in score_order(boxes) {
        for &kept_idx in kept.iter() {
            if overlap(idx, kept_idx) > threshold {
                continue 'outer;
            }
        }
        kept.push(idx);
    }

    kept
}
