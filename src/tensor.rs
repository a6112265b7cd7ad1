//! Conversion between stacked tensors and keyed slice records.
//!
//! A tensor of shape `(n, ...)` is addressed by its leading key axes; each
//! record carries the key and the remaining sub-array. Stacking goes the other
//! way: records are ordered, 2-D slices optionally gain a trailing channel
//! axis, and everything is stacked along a new leading axis.
use crate::error::TensorError;
use log::debug;
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension};

/// One slice of a tensor addressed by its key-axis coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorRecord<T> {
    pub key: Vec<usize>,
    pub data: ArrayD<T>,
}

impl<T> TensorRecord<T> {
    pub fn new(key: Vec<usize>, data: ArrayD<T>) -> Self {
        Self { key, data }
    }

    /// Record addressed by a single index.
    pub fn indexed(index: usize, data: ArrayD<T>) -> Self {
        Self::new(vec![index], data)
    }
}

/// Options for [`stack_records`].
#[derive(Clone, Copy, Debug)]
pub struct StackOptions {
    /// Order records by key before stacking. Otherwise input order is kept.
    pub sort_by_key: bool,
    /// Require keys to be exactly `[0], [1], .. [n-1]` (implies sorting).
    pub keep_keys: bool,
    /// Give 2-D slices a trailing channel axis of length 1.
    pub add_channel: bool,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            sort_by_key: true,
            keep_keys: false,
            add_channel: true,
        }
    }
}

impl StackOptions {
    pub fn with_sort(mut self, sort_by_key: bool) -> Self {
        self.sort_by_key = sort_by_key;
        self
    }

    pub fn with_keep_keys(mut self, keep_keys: bool) -> Self {
        self.keep_keys = keep_keys;
        self
    }

    pub fn with_channel(mut self, add_channel: bool) -> Self {
        self.add_channel = add_channel;
        self
    }
}

fn check_dense_keys<T>(records: &[TensorRecord<T>]) -> Result<(), TensorError> {
    let count = records.len();
    for (i, record) in records.iter().enumerate() {
        if record.key.as_slice() == [i] {
            continue;
        }
        if i > 0 && records[i - 1].key == record.key {
            return Err(TensorError::DuplicateKey(record.key.clone()));
        }
        return Err(TensorError::KeyOutOfRange {
            key: record.key.clone(),
            count,
        });
    }
    Ok(())
}

/// Stack records into a tensor of shape `(records.len(),) + slice_shape`.
pub fn stack_records<T: Clone>(
    mut records: Vec<TensorRecord<T>>,
    options: StackOptions,
) -> Result<ArrayD<T>, TensorError> {
    if records.is_empty() {
        return Err(TensorError::Empty);
    }
    if options.sort_by_key || options.keep_keys {
        records.sort_by(|a, b| a.key.cmp(&b.key));
    }
    if options.keep_keys {
        check_dense_keys(&records)?;
    }

    let slices: Vec<ArrayD<T>> = records
        .into_iter()
        .map(|record| {
            if options.add_channel && record.data.ndim() == 2 {
                record.data.insert_axis(Axis(2))
            } else {
                record.data
            }
        })
        .collect();

    let expected = slices[0].shape().to_vec();
    for (index, slice) in slices.iter().enumerate().skip(1) {
        if slice.shape() != expected.as_slice() {
            return Err(TensorError::ShapeMismatch {
                index,
                expected,
                actual: slice.shape().to_vec(),
            });
        }
    }

    let views: Vec<ArrayViewD<'_, T>> = slices.iter().map(|s| s.view()).collect();
    let stacked = ndarray::stack(Axis(0), &views)?;
    debug!(
        "stack_records: {} slices of {:?} -> {:?}",
        slices.len(),
        expected,
        stacked.shape()
    );
    Ok(stacked)
}

/// Split `tensor` into records over its leading `key_axes` axes, row-major.
pub fn to_records<T, S, D>(
    tensor: &ArrayBase<S, D>,
    key_axes: usize,
) -> Result<Vec<TensorRecord<T>>, TensorError>
where
    T: Clone,
    S: Data<Elem = T>,
    D: Dimension,
{
    let view = tensor.view().into_dyn();
    if key_axes > view.ndim() {
        return Err(TensorError::KeyAxes {
            key_axes,
            ndim: view.ndim(),
        });
    }

    let records = ndarray::indices(&view.shape()[..key_axes])
        .into_iter()
        .map(|idx| {
            let key = idx.slice().to_vec();
            let mut sub = view.view();
            for &i in &key {
                sub = sub.index_axis_move(Axis(0), i);
            }
            TensorRecord::new(key, sub.to_owned())
        })
        .collect();
    Ok(records)
}

/// File name for a record: zero-padded key components joined by `_`.
///
/// An empty key (the whole tensor is one slice) is named like index 0.
pub fn slice_file_name(key: &[usize], ext: &str) -> String {
    if key.is_empty() {
        return format!("{:05}.{ext}", 0);
    }
    let stem = key
        .iter()
        .map(|k| format!("{k:05}"))
        .collect::<Vec<_>>()
        .join("_");
    format!("{stem}.{ext}")
}
