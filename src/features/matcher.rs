//! Brute-force descriptor matching with optional cross-check.

use crate::features::{DescriptorSet, Descriptors, FeatureExtractor};
use crate::image::ImageView;
use crate::kernel::scalar::nearest_neighbors;
use crate::kernel::{DistanceKernel, Hamming, Nearest, L2};
use crate::trace::{enter_span, trace_event};
use crate::util::{SimScoreError, SimScoreResult};

#[cfg(feature = "rayon")]
use crate::kernel::rayon::nearest_neighbors_par;

/// Correspondence between a query descriptor and a train descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Index into the query (first) set.
    pub query_idx: usize,
    /// Index into the train (second) set.
    pub train_idx: usize,
    /// Descriptor distance under the sets' norm.
    pub distance: f32,
}

/// Configuration for [`DescriptorMatcher`].
#[derive(Clone, Copy, Debug)]
pub struct MatcherConfig {
    /// Keep only mutual nearest neighbors.
    pub cross_check: bool,
    /// Drop matches farther than this distance.
    pub max_distance: Option<f32>,
    /// Search query rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            cross_check: true,
            max_distance: None,
            parallel: false,
        }
    }
}

/// Descriptor sets of two images with their correspondences.
#[derive(Clone, Debug)]
pub struct ImageMatches {
    pub query: DescriptorSet,
    pub train: DescriptorSet,
    pub matches: Vec<Match>,
}

/// Brute-force nearest-neighbor matcher.
#[derive(Clone, Debug, Default)]
pub struct DescriptorMatcher {
    cfg: MatcherConfig,
}

impl DescriptorMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, cfg: MatcherConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.cfg
    }

    /// Matches every query descriptor to its nearest train descriptor.
    ///
    /// Returns at most one match per query, ordered by `query_idx`. Either set
    /// being empty yields no matches; two non-empty sets must share norm and
    /// row width.
    pub fn match_sets(
        &self,
        query: &DescriptorSet,
        train: &DescriptorSet,
    ) -> SimScoreResult<Vec<Match>> {
        enter_span!(
            "match_descriptors",
            query = query.len(),
            train = train.len(),
            cross_check = self.cfg.cross_check
        );

        if query.is_empty() || train.is_empty() {
            trace_event!("matches", count = 0usize);
            return Ok(Vec::new());
        }

        let (forward, backward) = match (query.descriptors(), train.descriptors()) {
            (
                Descriptors::Binary { width: wq, data: dq },
                Descriptors::Binary { width: wt, data: dt },
            ) => {
                check_width(*wq, *wt)?;
                self.nearest_both_ways::<Hamming>(dq, dt, *wq)
            }
            (
                Descriptors::Float { width: wq, data: dq },
                Descriptors::Float { width: wt, data: dt },
            ) => {
                check_width(*wq, *wt)?;
                self.nearest_both_ways::<L2>(dq, dt, *wq)
            }
            _ => {
                return Err(SimScoreError::NormMismatch {
                    left: query.norm(),
                    right: train.norm(),
                })
            }
        };

        let mut matches = Vec::with_capacity(forward.len());
        for (query_idx, nn) in forward.into_iter().enumerate() {
            let Some(nn) = nn else {
                continue;
            };
            if let Some(backward) = &backward {
                let mutual = backward
                    .get(nn.index)
                    .copied()
                    .flatten()
                    .is_some_and(|back| back.index == query_idx);
                if !mutual {
                    continue;
                }
            }
            if let Some(max_distance) = self.cfg.max_distance {
                if !(nn.distance <= max_distance) {
                    continue;
                }
            }
            matches.push(Match {
                query_idx,
                train_idx: nn.index,
                distance: nn.distance,
            });
        }

        trace_event!("matches", count = matches.len());
        Ok(matches)
    }

    /// Forward neighbors, plus reverse neighbors when cross-checking.
    #[allow(clippy::type_complexity)]
    fn nearest_both_ways<K: DistanceKernel>(
        &self,
        query: &[K::Elem],
        train: &[K::Elem],
        width: usize,
    ) -> (Vec<Option<Nearest>>, Option<Vec<Option<Nearest>>>) {
        let forward = nearest_rows::<K>(query, train, width, self.cfg.parallel);
        let backward = self
            .cfg
            .cross_check
            .then(|| nearest_rows::<K>(train, query, width, self.cfg.parallel));
        (forward, backward)
    }
}

fn check_width(query: usize, train: usize) -> SimScoreResult<()> {
    if query != train {
        return Err(SimScoreError::DescriptorWidthMismatch {
            left: query,
            right: train,
        });
    }
    Ok(())
}

#[cfg(feature = "rayon")]
fn nearest_rows<K: DistanceKernel>(
    query: &[K::Elem],
    train: &[K::Elem],
    width: usize,
    parallel: bool,
) -> Vec<Option<Nearest>> {
    if parallel {
        nearest_neighbors_par::<K>(query, train, width)
    } else {
        nearest_neighbors::<K>(query, train, width)
    }
}

#[cfg(not(feature = "rayon"))]
fn nearest_rows<K: DistanceKernel>(
    query: &[K::Elem],
    train: &[K::Elem],
    width: usize,
    _parallel: bool,
) -> Vec<Option<Nearest>> {
    nearest_neighbors::<K>(query, train, width)
}

/// Matches two descriptor sets with default settings and the given cross-check.
pub fn match_descriptors(
    query: &DescriptorSet,
    train: &DescriptorSet,
    cross_check: bool,
) -> SimScoreResult<Vec<Match>> {
    DescriptorMatcher::new()
        .with_config(MatcherConfig {
            cross_check,
            ..MatcherConfig::default()
        })
        .match_sets(query, train)
}

/// Extracts features from both images and matches them.
pub fn match_images<E: FeatureExtractor + ?Sized>(
    extractor: &E,
    query: ImageView<'_, u8>,
    train: ImageView<'_, u8>,
    max_features: usize,
    cfg: MatcherConfig,
) -> SimScoreResult<ImageMatches> {
    let query_set = extractor.extract(query, max_features)?;
    let train_set = extractor.extract(train, max_features)?;
    let matches = DescriptorMatcher::new()
        .with_config(cfg)
        .match_sets(&query_set, &train_set)?;
    Ok(ImageMatches {
        query: query_set,
        train: train_set,
        matches,
    })
}

#[cfg(test)]
mod tests {
    use super::{match_descriptors, DescriptorMatcher, Match, MatcherConfig};
    use crate::features::{DescriptorSet, Keypoint, Norm};
    use crate::util::SimScoreError;

    fn binary_set(rows: &[u8]) -> DescriptorSet {
        let kps = (0..rows.len()).map(|i| Keypoint::at(i as f32, 0.0)).collect();
        DescriptorSet::binary(kps, 1, rows.to_vec()).unwrap()
    }

    #[test]
    fn one_sided_match_is_removed_by_cross_check() {
        // Both queries prefer train 0, which prefers query 0.
        let query = binary_set(&[0b0000_0000, 0b0000_0001]);
        let train = binary_set(&[0b0000_0000, 0b1111_0000]);

        let plain = match_descriptors(&query, &train, false).unwrap();
        assert_eq!(plain.len(), 2);
        assert_eq!(plain[1].train_idx, 0);

        let checked = match_descriptors(&query, &train, true).unwrap();
        assert_eq!(
            checked,
            vec![Match {
                query_idx: 0,
                train_idx: 0,
                distance: 0.0
            }]
        );
    }

    #[test]
    fn max_distance_filters_far_matches() {
        let query = binary_set(&[0x00, 0xFF]);
        let train = binary_set(&[0x01, 0x0F]);
        let matcher = DescriptorMatcher::new().with_config(MatcherConfig {
            cross_check: false,
            max_distance: Some(2.0),
            parallel: false,
        });
        let matches = matcher.match_sets(&query, &train).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].query_idx, 0);
    }

    #[test]
    fn float_sets_use_euclidean_distance() {
        let kps = vec![Keypoint::at(0.0, 0.0); 2];
        let query = DescriptorSet::float(kps.clone(), 2, vec![0.0, 0.0, 10.0, 10.0]).unwrap();
        let train = DescriptorSet::float(kps, 2, vec![9.0, 10.0, 3.0, 4.0]).unwrap();
        let matches = match_descriptors(&query, &train, true).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].train_idx, 1);
        assert!((matches[0].distance - 5.0).abs() < 1e-6);
        assert_eq!(matches[1].train_idx, 0);
    }

    #[test]
    fn incompatible_sets_are_rejected() {
        let binary = binary_set(&[1, 2]);
        let float = DescriptorSet::float(vec![Keypoint::at(0.0, 0.0)], 1, vec![1.0]).unwrap();
        assert_eq!(
            match_descriptors(&binary, &float, true).unwrap_err(),
            SimScoreError::NormMismatch {
                left: Norm::Hamming,
                right: Norm::L2
            }
        );

        let wide = DescriptorSet::binary(vec![Keypoint::at(0.0, 0.0)], 2, vec![0, 0]).unwrap();
        assert_eq!(
            match_descriptors(&binary, &wide, false).unwrap_err(),
            SimScoreError::DescriptorWidthMismatch { left: 1, right: 2 }
        );
    }

    #[test]
    fn empty_side_short_circuits_before_compatibility_checks() {
        let binary = binary_set(&[1, 2]);
        let empty_float = DescriptorSet::empty(Norm::L2, 64).unwrap();
        assert!(match_descriptors(&binary, &empty_float, true)
            .unwrap()
            .is_empty());
        assert!(match_descriptors(&empty_float, &binary, false)
            .unwrap()
            .is_empty());
    }
}
