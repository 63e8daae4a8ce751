//! Keypoints, descriptor sets and the feature-extractor boundary.
//!
//! Descriptor storage is tagged by encoding: binary rows are compared with the
//! Hamming distance, float rows with the Euclidean distance. The norm is never
//! guessed from the data.

mod matcher;

use crate::image::ImageView;
use crate::util::{SimScoreError, SimScoreResult};

pub use matcher::{
    match_descriptors, match_images, DescriptorMatcher, ImageMatches, Match, MatcherConfig,
};

/// Distance norm implied by a descriptor encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Norm {
    /// Bit-count distance over packed bytes.
    Hamming,
    /// Euclidean distance over `f32` components.
    L2,
}

/// Detected interest point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Diameter of the described neighborhood in pixels.
    pub size: f32,
    /// Orientation in degrees, negative when not computed.
    pub angle: f32,
    /// Detector response; higher is stronger.
    pub response: f32,
    /// Pyramid level the point was detected on.
    pub octave: i32,
}

impl Keypoint {
    /// Creates a keypoint at `(x, y)` with neutral metadata.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            size: 0.0,
            angle: -1.0,
            response: 0.0,
            octave: 0,
        }
    }
}

/// Row-major descriptor buffer, `width` elements per row.
#[derive(Clone, Debug, PartialEq)]
pub enum Descriptors {
    Binary { width: usize, data: Vec<u8> },
    Float { width: usize, data: Vec<f32> },
}

impl Descriptors {
    pub fn norm(&self) -> Norm {
        match self {
            Descriptors::Binary { .. } => Norm::Hamming,
            Descriptors::Float { .. } => Norm::L2,
        }
    }

    /// Elements per descriptor row (bytes for binary, floats for float).
    pub fn width(&self) -> usize {
        match self {
            Descriptors::Binary { width, .. } | Descriptors::Float { width, .. } => *width,
        }
    }

    /// Number of complete rows.
    pub fn rows(&self) -> usize {
        let len = match self {
            Descriptors::Binary { data, .. } => data.len(),
            Descriptors::Float { data, .. } => data.len(),
        };
        len.checked_div(self.width()).unwrap_or(0)
    }
}

/// Keypoints of one image with one descriptor row each.
#[derive(Clone, Debug, PartialEq)]
pub struct DescriptorSet {
    keypoints: Vec<Keypoint>,
    descriptors: Descriptors,
}

impl DescriptorSet {
    /// Builds a set from keypoints and matching descriptor storage.
    pub fn new(keypoints: Vec<Keypoint>, descriptors: Descriptors) -> SimScoreResult<Self> {
        let width = descriptors.width();
        if width == 0 {
            return Err(SimScoreError::InvalidInput("descriptor width must be positive"));
        }
        let len = match &descriptors {
            Descriptors::Binary { data, .. } => data.len(),
            Descriptors::Float { data, .. } => data.len(),
        };
        if len % width != 0 {
            return Err(SimScoreError::InvalidInput(
                "descriptor data is not a multiple of width",
            ));
        }
        if len / width != keypoints.len() {
            return Err(SimScoreError::DescriptorCountMismatch {
                keypoints: keypoints.len(),
                rows: len / width,
            });
        }
        Ok(Self {
            keypoints,
            descriptors,
        })
    }

    /// Builds a set of packed binary descriptors, `width` bytes per keypoint.
    pub fn binary(keypoints: Vec<Keypoint>, width: usize, data: Vec<u8>) -> SimScoreResult<Self> {
        Self::new(keypoints, Descriptors::Binary { width, data })
    }

    /// Builds a set of float descriptors, `width` components per keypoint.
    pub fn float(keypoints: Vec<Keypoint>, width: usize, data: Vec<f32>) -> SimScoreResult<Self> {
        Self::new(keypoints, Descriptors::Float { width, data })
    }

    /// Empty set for an encoding; extractors return this when nothing is found.
    pub fn empty(norm: Norm, width: usize) -> SimScoreResult<Self> {
        let descriptors = match norm {
            Norm::Hamming => Descriptors::Binary {
                width,
                data: Vec::new(),
            },
            Norm::L2 => Descriptors::Float {
                width,
                data: Vec::new(),
            },
        };
        Self::new(Vec::new(), descriptors)
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn norm(&self) -> Norm {
        self.descriptors.norm()
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }
}

/// Produces keypoints and descriptors from a grayscale image.
///
/// Implementations should be deterministic for a given input and use one
/// encoding for every call so that sets from different images can be matched.
pub trait FeatureExtractor {
    /// Extracts at most `max_features` features; an empty set is a valid result.
    fn extract(&self, image: ImageView<'_, u8>, max_features: usize)
        -> SimScoreResult<DescriptorSet>;
}
