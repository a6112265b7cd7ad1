#![doc = include_str!("../README.md")]

// Core cropping surface
pub mod crop;
pub mod error;
pub mod grid;

// Tensor assembly, file I/O and reporting used by the tools
pub mod config;
pub mod diagnostics;
pub mod io;
pub mod tensor;

// Visualization preparation (masks and frame schedules, no rendering)
pub mod viz;

// --- High-level re-exports -------------------------------------------------

pub use crate::crop::{
    apply_bounding_box, autocrop, axis_projection_sum, bounding_box, compute_bounding_box,
    BoundingBox,
};
pub use crate::error::{CropError, TensorError};
pub use crate::grid::{meshgrid_nd, meshgrid_nd_like, meshgrid_nd_with};
pub use crate::tensor::{stack_records, to_records, StackOptions, TensorRecord};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use ndarray::Array2;
/// use volume_crop::prelude::*;
///
/// let mut img = Array2::<u8>::zeros((5, 5));
/// img[[1, 2]] = 9;
/// img[[3, 3]] = 4;
///
/// let bbox = compute_bounding_box(&img, 0);
/// assert_eq!(bbox.ranges(), &[(1, 4), (2, 4)]);
/// assert_eq!(autocrop(&img, 0).shape(), &[3, 2]);
/// ```
pub mod prelude {
    pub use crate::crop::{apply_bounding_box, autocrop, compute_bounding_box, BoundingBox};
    pub use crate::error::CropError;
    pub use crate::grid::meshgrid_nd_like;
}
