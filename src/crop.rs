//! Bounding-box autocrop for N-dimensional arrays.
//!
//! The cropper finds the smallest axis-aligned box that contains every element
//! strictly greater than a threshold and slices the array down to it.
//!
//! - `axis_projection_sum`: sum over every axis but one, yielding a 1-D profile.
//! - `compute_bounding_box`: per-axis `(lo, hi)` spans of the thresholded mask.
//! - `apply_bounding_box`: validated multi-axis slicing, returning a view.
//! - `autocrop`: the composition of the two.
//!
//! Each axis is bounded from its own projection, so the result is a bounding
//! box rather than a tight mask: for non-convex active regions it can include
//! inactive elements. An axis without active elements yields `(0, 0)`, and
//! slicing with such a box produces an array with zero extent along that
//! axis. That is a regular result, not an error.
use crate::error::CropError;
use ndarray::{
    Array1, ArrayBase, ArrayView, ArrayViewD, Axis, Data, Dimension, LinalgScalar, Slice,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-axis `(lo, hi)` ranges, `lo` inclusive and `hi` exclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundingBox {
    ranges: Vec<(usize, usize)>,
}

impl BoundingBox {
    pub fn new(ranges: Vec<(usize, usize)>) -> Self {
        Self { ranges }
    }

    /// Box covering an entire array of the given shape.
    pub fn full(shape: &[usize]) -> Self {
        Self {
            ranges: shape.iter().map(|&extent| (0, extent)).collect(),
        }
    }

    pub fn ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }

    pub fn ndim(&self) -> usize {
        self.ranges.len()
    }

    /// Lower corner of the box.
    pub fn offset(&self) -> Vec<usize> {
        self.ranges.iter().map(|&(lo, _)| lo).collect()
    }

    /// Extent of the box along each axis.
    pub fn shape(&self) -> Vec<usize> {
        self.ranges
            .iter()
            .map(|&(lo, hi)| hi.saturating_sub(lo))
            .collect()
    }

    /// Number of elements inside the box.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// True when at least one axis has zero width.
    pub fn is_empty(&self) -> bool {
        self.ranges.iter().any(|&(lo, hi)| hi <= lo)
    }

    /// Check the box against an array shape.
    pub fn validate(&self, shape: &[usize]) -> Result<(), CropError> {
        if self.ranges.len() != shape.len() {
            return Err(CropError::BoxDimensionMismatch {
                expected: shape.len(),
                actual: self.ranges.len(),
            });
        }
        for (axis, (&(lo, hi), &extent)) in self.ranges.iter().zip(shape).enumerate() {
            if lo > hi || hi > extent {
                return Err(CropError::BoxRangeOutOfBounds {
                    axis,
                    lo,
                    hi,
                    extent,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<(usize, usize)>> for BoundingBox {
    fn from(ranges: Vec<(usize, usize)>) -> Self {
        Self::new(ranges)
    }
}

/// Sum `array` over every axis except `axis`.
///
/// Element `i` of the result is the sum of all elements whose coordinate along
/// `axis` equals `i`. A 1-D input is returned unchanged.
pub fn axis_projection_sum<T, S, D>(
    array: &ArrayBase<S, D>,
    axis: usize,
) -> Result<Array1<T>, CropError>
where
    T: LinalgScalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let ndim = array.ndim();
    if axis >= ndim {
        return Err(CropError::AxisOutOfRange { axis, ndim });
    }
    Ok(project(array.view().into_dyn(), axis))
}

fn project<T: LinalgScalar>(view: ArrayViewD<'_, T>, axis: usize) -> Array1<T> {
    view.axis_iter(Axis(axis)).map(|lane| lane.sum()).collect()
}

/// First and one-past-last nonzero positions of a projection, `(0, 0)` if none.
fn occupied_span(projection: &Array1<usize>) -> (usize, usize) {
    let mut occupied = projection
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(i, _)| i);
    match occupied.next() {
        None => (0, 0),
        Some(lo) => (lo, occupied.last().unwrap_or(lo) + 1),
    }
}

/// Bounding box of all elements strictly greater than `min_val`.
///
/// Axes are evaluated independently (and in parallel); the returned ranges are
/// always in axis order.
pub fn compute_bounding_box<T, S, D>(array: &ArrayBase<S, D>, min_val: T) -> BoundingBox
where
    T: PartialOrd,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mask = array.view().into_dyn().map(|v| usize::from(*v > min_val));
    let ranges = (0..mask.ndim())
        .into_par_iter()
        .map(|axis| occupied_span(&project(mask.view(), axis)))
        .collect();
    BoundingBox::new(ranges)
}

/// Bounding box using the element type's default (zero) as threshold.
pub fn bounding_box<T, S, D>(array: &ArrayBase<S, D>) -> BoundingBox
where
    T: PartialOrd + Default,
    S: Data<Elem = T>,
    D: Dimension,
{
    compute_bounding_box(array, T::default())
}

/// Slice `array` down to `bbox`.
///
/// Fails with an invalid-bounding-box error when `bbox` has the wrong number of
/// axes or a range is reversed or exceeds the array extent. Degenerate
/// `(lo, lo)` ranges are valid and give zero extent along their axis:
///
/// ```
/// use ndarray::Array3;
/// use volume_crop::{apply_bounding_box, BoundingBox};
///
/// let vol = Array3::<u8>::zeros((2, 3, 4));
/// let empty = apply_bounding_box(&vol, &BoundingBox::new(vec![(0, 0); 3])).unwrap();
/// assert_eq!(empty.shape(), &[0, 0, 0]);
/// ```
pub fn apply_bounding_box<'a, T, S, D>(
    array: &'a ArrayBase<S, D>,
    bbox: &BoundingBox,
) -> Result<ArrayView<'a, T, D>, CropError>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    bbox.validate(array.shape())?;
    Ok(slice_to(array, bbox))
}

fn slice_to<'a, T, S, D>(array: &'a ArrayBase<S, D>, bbox: &BoundingBox) -> ArrayView<'a, T, D>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    array.slice_each_axis(|desc| {
        let (lo, hi) = bbox.ranges[desc.axis.index()];
        Slice::from(lo..hi)
    })
}

/// Crop `array` to the bounding box of elements strictly greater than `min_val`.
pub fn autocrop<T, S, D>(array: &ArrayBase<S, D>, min_val: T) -> ArrayView<'_, T, D>
where
    T: PartialOrd,
    S: Data<Elem = T>,
    D: Dimension,
{
    autocrop_with_box(array, min_val).1
}

/// Like [`autocrop`], also returning the box that was applied.
pub fn autocrop_with_box<T, S, D>(
    array: &ArrayBase<S, D>,
    min_val: T,
) -> (BoundingBox, ArrayView<'_, T, D>)
where
    T: PartialOrd,
    S: Data<Elem = T>,
    D: Dimension,
{
    let bbox = compute_bounding_box(array, min_val);
    // Computed spans are always within the array extents.
    let cropped = slice_to(array, &bbox);
    (bbox, cropped)
}
