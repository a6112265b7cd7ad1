//! Error types for cropping and tensor assembly.

use thiserror::Error;

/// Errors raised by the bounding-box cropper.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CropError {
    /// Requested projection axis does not exist.
    #[error("axis {axis} out of range for {ndim}-dimensional array")]
    AxisOutOfRange {
        /// The requested axis.
        axis: usize,
        /// Dimensionality of the array.
        ndim: usize,
    },

    /// Bounding box has a different number of axes than the array.
    #[error("invalid bounding box: expected {expected} axis ranges, got {actual}")]
    BoxDimensionMismatch {
        /// Dimensionality of the array.
        expected: usize,
        /// Number of ranges in the box.
        actual: usize,
    },

    /// A range is reversed or extends past the array extent.
    #[error("invalid bounding box on axis {axis}: range {lo}..{hi} not within 0..{extent}")]
    BoxRangeOutOfBounds {
        /// Offending axis.
        axis: usize,
        /// Inclusive lower bound.
        lo: usize,
        /// Exclusive upper bound.
        hi: usize,
        /// Array extent along `axis`.
        extent: usize,
    },
}

impl CropError {
    /// True for errors caused by a malformed bounding box.
    pub fn is_invalid_bounding_box(&self) -> bool {
        matches!(
            self,
            Self::BoxDimensionMismatch { .. } | Self::BoxRangeOutOfBounds { .. }
        )
    }
}

/// Errors raised while converting between tensors and keyed slice records.
#[derive(Debug, Error)]
pub enum TensorError {
    /// No records were supplied.
    #[error("cannot build a tensor from zero records")]
    Empty,

    /// A record's slice shape differs from the first record.
    #[error("record {index} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Position of the record after sorting.
        index: usize,
        /// Shape of the first record.
        expected: Vec<usize>,
        /// Shape of the offending record.
        actual: Vec<usize>,
    },

    /// More key axes were requested than the tensor has.
    #[error("cannot split {ndim}-dimensional tensor on {key_axes} key axes")]
    KeyAxes {
        /// Requested key axes.
        key_axes: usize,
        /// Dimensionality of the tensor.
        ndim: usize,
    },

    /// A record key does not address a slot in `0..count`.
    #[error("record key {key:?} out of range for {count} records")]
    KeyOutOfRange {
        /// Offending key.
        key: Vec<usize>,
        /// Number of records.
        count: usize,
    },

    /// Two records share a key.
    #[error("duplicate record key {0:?}")]
    DuplicateKey(Vec<usize>),

    /// Underlying ndarray shape failure.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
