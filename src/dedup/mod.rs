//! Scored detection boxes and greedy IoU deduplication.
//!
//! Boxes are axis-aligned with a top-left origin. Zero-area boxes are valid
//! and simply never overlap anything.

pub(crate) mod nms;

use crate::util::{SimScoreError, SimScoreResult};

pub use nms::{deduplicate, deduplicate_indices, iou_matrix, DedupConfig, Deduplicator};

/// Axis-aligned box `(x, y, w, h)` with a detector score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    score: f64,
}

impl BBox {
    /// Creates a box, rejecting negative extents and non-finite values.
    ///
    /// The right/bottom edges and twice the area must also be finite.
    pub fn new(x: f64, y: f64, w: f64, h: f64, score: f64) -> SimScoreResult<Self> {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return Err(SimScoreError::InvalidBox {
                reason: "non-finite geometry",
            });
        }
        if w < 0.0 || h < 0.0 {
            return Err(SimScoreError::InvalidBox {
                reason: "negative extent",
            });
        }
        if !score.is_finite() {
            return Err(SimScoreError::InvalidBox {
                reason: "non-finite score",
            });
        }
        // Room for the union of two boxes.
        if !((x + w).is_finite() && (y + h).is_finite() && (2.0 * w * h).is_finite()) {
            return Err(SimScoreError::InvalidBox {
                reason: "extent overflows",
            });
        }
        Ok(Self { x, y, w, h, score })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn height(&self) -> f64 {
        self.h
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Area of the overlap with `other`, zero when disjoint.
    ///
    /// Never exceeds the smaller of the two areas; edge subtraction can round
    /// past the true extent, so each side is capped by the narrower box.
    pub fn intersection_area(&self, other: &BBox) -> f64 {
        let iw = (self.right().min(other.right()) - self.x.max(other.x))
            .clamp(0.0, self.w.min(other.w));
        let ih = (self.bottom().min(other.bottom()) - self.y.max(other.y))
            .clamp(0.0, self.h.min(other.h));
        iw * ih
    }
}

/// Intersection-over-union of two boxes in `[0, 1]`.
///
/// Returns `0.0` when the union area is zero, e.g. for two degenerate boxes.
pub fn iou(a: &BBox, b: &BBox) -> f64 {
    let inter = a.intersection_area(b);
    let union = a.area() + b.area() - inter;
    if union > 0.0 {
        (inter / union).min(1.0)
    } else {
        0.0
    }
}
