//! Descriptor distance kernels and brute-force nearest-neighbor search.
//!
//! A kernel fixes the element type and distance of one descriptor encoding.
//! The search helpers walk row-major descriptor buffers with `width` elements
//! per row and pick, for each query row, the train row with the smallest
//! distance; ties go to the lowest train index.

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Distance between two descriptor rows of equal width.
pub trait DistanceKernel {
    type Elem: Sync;

    fn distance(a: &[Self::Elem], b: &[Self::Elem]) -> f32;
}

/// Bit-count distance for packed binary descriptors (ORB, BRIEF, AKAZE).
pub struct Hamming;

/// Euclidean distance for float descriptors (SIFT, SURF).
pub struct L2;

/// Best train row for one query row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nearest {
    /// Row index in the train buffer.
    pub index: usize,
    /// Distance between the query row and that train row.
    pub distance: f32,
}
