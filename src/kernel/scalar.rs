//! Scalar reference kernels.

use crate::kernel::{DistanceKernel, Hamming, Nearest, L2};

impl DistanceKernel for Hamming {
    type Elem = u8;

    #[inline]
    fn distance(a: &[u8], b: &[u8]) -> f32 {
        let bits: u32 = a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum();
        bits as f32
    }
}

impl DistanceKernel for L2 {
    type Elem = f32;

    #[inline]
    fn distance(a: &[f32], b: &[f32]) -> f32 {
        let sum: f32 = a
            .iter()
            .zip(b)
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum();
        sum.sqrt()
    }
}

/// Nearest train row for a single query row, `None` when `train` is empty.
///
/// A later row replaces the current best only when strictly closer, so ties
/// resolve to the lowest index. NaN distances order after every number.
pub fn nearest<K: DistanceKernel>(
    query: &[K::Elem],
    train: &[K::Elem],
    width: usize,
) -> Option<Nearest> {
    if width == 0 {
        return None;
    }
    let mut best: Option<Nearest> = None;
    for (index, row) in train.chunks_exact(width).enumerate() {
        let distance = K::distance(query, row);
        let better = match best {
            None => true,
            Some(current) => {
                distance < current.distance || (current.distance.is_nan() && !distance.is_nan())
            }
        };
        if better {
            best = Some(Nearest { index, distance });
        }
    }
    best
}

/// Nearest train row for every query row, in query order.
pub fn nearest_neighbors<K: DistanceKernel>(
    queries: &[K::Elem],
    train: &[K::Elem],
    width: usize,
) -> Vec<Option<Nearest>> {
    if width == 0 {
        return Vec::new();
    }
    queries
        .chunks_exact(width)
        .map(|query| nearest::<K>(query, train, width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{nearest, nearest_neighbors};
    use crate::kernel::{DistanceKernel, Hamming, Nearest, L2};

    #[test]
    fn hamming_counts_differing_bits() {
        assert_eq!(Hamming::distance(&[0b1010_1010, 0xFF], &[0b0101_0101, 0xFF]), 8.0);
        assert_eq!(Hamming::distance(&[0x0F], &[0x0E]), 1.0);
        assert_eq!(Hamming::distance(&[7, 7], &[7, 7]), 0.0);
    }

    #[test]
    fn l2_is_euclidean() {
        assert!((L2::distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let train = [0b0000_0011u8, 0b0000_0101, 0b0000_0001];
        let best = nearest::<Hamming>(&[0b0000_0111], &train, 1).unwrap();
        assert_eq!(best, Nearest { index: 0, distance: 1.0 });
    }

    #[test]
    fn nan_rows_never_beat_finite_rows() {
        let train = [f32::NAN, 0.0, 10.0, 0.0];
        let best = nearest::<L2>(&[9.0, 0.0], &train, 2).unwrap();
        assert_eq!(best.index, 1);
    }

    #[test]
    fn empty_train_has_no_neighbor() {
        assert!(nearest::<Hamming>(&[1], &[], 1).is_none());
        assert_eq!(nearest_neighbors::<Hamming>(&[1, 2], &[], 1), vec![None, None]);
    }
}
