//! N-dimensional coordinate grids.
//!
//! `meshgrid_nd(shape)` returns one array per axis, each of the full `shape`,
//! holding the coordinate along that axis ("ij" indexing). For a `(3, 2)`
//! shape the first array varies down rows and the second across columns.
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};

/// Coordinate arrays for `shape`, produced by `coord(axis, index)`.
pub fn meshgrid_nd_with<T, F>(shape: &[usize], mut coord: F) -> Vec<ArrayD<T>>
where
    F: FnMut(usize, usize) -> T,
{
    (0..shape.len())
        .map(|axis| ArrayD::from_shape_fn(IxDyn(shape), |idx| coord(axis, idx[axis])))
        .collect()
}

/// Integer index grids for `shape`.
pub fn meshgrid_nd(shape: &[usize]) -> Vec<ArrayD<usize>> {
    meshgrid_nd_with(shape, |_, i| i)
}

/// Integer index grids shaped like `array`.
pub fn meshgrid_nd_like<S, D>(array: &ArrayBase<S, D>) -> Vec<ArrayD<usize>>
where
    S: Data,
    D: Dimension,
{
    meshgrid_nd(array.shape())
}
