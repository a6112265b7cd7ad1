//! I/O helpers for image slices, tensors and JSON.
//!
//! - `load_grayscale_array`: read a PNG/JPEG/TIFF into an owned `Array2<u8>`.
//! - `load_grayscale_stack`: read several images into an `Array3<u8>` volume.
//! - `save_gray_array`: write a 2-D array to a grayscale image.
//! - `ensure_writable`: refuse to replace an existing file unless allowed.
//! - `save_tensor_local`: write every record of a tensor as its own image file.
//! - `write_json_file` / `write_records_json`: pretty-print JSON to disk.
use crate::tensor::{self, StackOptions, TensorRecord};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use log::{debug, warn};
use ndarray::{Array2, Array3, ArrayBase, ArrayView2, ArrayViewD, Axis, Data, Dimension, Ix2, Ix3};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Element types that can be written as 8-bit image samples.
///
/// Floating point samples are interpreted as `[0, 1]` intensities and clamped.
pub trait GrayPixel: Copy {
    fn to_u8(self) -> u8;
}

impl GrayPixel for u8 {
    #[inline]
    fn to_u8(self) -> u8 {
        self
    }
}

impl GrayPixel for u16 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self >> 8) as u8
    }
}

impl GrayPixel for f32 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self * 255.0).clamp(0.0, 255.0) as u8
    }
}

impl GrayPixel for f64 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self * 255.0).clamp(0.0, 255.0) as u8
    }
}

/// Options for [`save_tensor_local`].
#[derive(Clone, Debug)]
pub struct SaveOptions {
    /// Write into an existing directory instead of failing.
    pub allow_overwrite: bool,
    /// Extension selecting the encoder (`png`, `tif`, `jpg`).
    pub file_ext: String,
    /// Number of leading axes that address individual slices; `None` derives
    /// it from the tensor shape (see [`slice_key_axes`]).
    pub key_axes: Option<usize>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            allow_overwrite: false,
            file_ext: "tif".to_string(),
            key_axes: None,
        }
    }
}

/// Load an image from disk as 8-bit grayscale, indexed `[row, col]`.
pub fn load_grayscale_array(path: &Path) -> Result<Array2<u8>, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    Array2::from_shape_vec((height, width), img.into_raw())
        .map_err(|e| format!("Failed to shape {}: {e}", path.display()))
}

/// Load equally sized images as a `(slices, rows, cols)` volume in the given order.
pub fn load_grayscale_stack<P: AsRef<Path>>(paths: &[P]) -> Result<Array3<u8>, String> {
    let records = paths
        .iter()
        .enumerate()
        .map(|(i, p)| {
            load_grayscale_array(p.as_ref()).map(|a| TensorRecord::indexed(i, a.into_dyn()))
        })
        .collect::<Result<Vec<_>, String>>()?;
    let options = StackOptions::default().with_sort(false).with_channel(false);
    let stack = tensor::stack_records(records, options)
        .map_err(|e| format!("Failed to stack images: {e}"))?;
    debug!("load_grayscale_stack: {} slices -> {:?}", paths.len(), stack.shape());
    stack
        .into_dimensionality::<Ix3>()
        .map_err(|e| format!("Failed to stack images: {e}"))
}

/// Save a 2-D array to a grayscale image; parent directories are created.
pub fn save_gray_array<T, S>(array: &ArrayBase<S, Ix2>, path: &Path) -> Result<(), String>
where
    T: GrayPixel,
    S: Data<Elem = T>,
{
    ensure_parent_dir(path)?;
    gray_image(array)?
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Fail if `path` already exists and overwriting is not allowed.
pub fn ensure_writable(path: &Path, allow_overwrite: bool) -> Result<(), String> {
    if path.exists() {
        warn!("{} already exists", path.display());
        if !allow_overwrite {
            return Err(format!(
                "Overwriting has not been enabled, remove file {}",
                path.display()
            ));
        }
    }
    Ok(())
}

fn gray_image<T, S>(array: &ArrayBase<S, Ix2>) -> Result<GrayImage, String>
where
    T: GrayPixel,
    S: Data<Elem = T>,
{
    let (h, w) = array.dim();
    if h == 0 || w == 0 {
        return Err(format!("Cannot encode an empty {h}x{w} image"));
    }
    let mut out = GrayImage::new(w as u32, h as u32);
    for ((y, x), &px) in array.indexed_iter() {
        out.put_pixel(x as u32, y as u32, Luma([px.to_u8()]));
    }
    Ok(out)
}

fn as_plane<T>(view: ArrayViewD<'_, T>) -> Result<ArrayView2<'_, T>, String> {
    view.into_dimensionality::<Ix2>().map_err(|e| e.to_string())
}

/// Save one slice: `(rows, cols)` or `(rows, cols, channels)` with 1, 3 or 4 channels.
fn save_slice<T: GrayPixel>(slice: ArrayViewD<'_, T>, path: &Path) -> Result<(), String> {
    let shape = slice.shape().to_vec();
    let img = match shape.as_slice() {
        [_, _] => DynamicImage::ImageLuma8(gray_image(&as_plane(slice)?)?),
        [_, _, 1] => {
            let plane = as_plane(slice.index_axis_move(Axis(2), 0))?;
            DynamicImage::ImageLuma8(gray_image(&plane)?)
        }
        &[h, w, 3] if h > 0 && w > 0 => {
            DynamicImage::ImageRgb8(RgbImage::from_fn(w as u32, h as u32, |x, y| {
                let (x, y) = (x as usize, y as usize);
                Rgb([0, 1, 2].map(|c| slice[[y, x, c]].to_u8()))
            }))
        }
        &[h, w, 4] if h > 0 && w > 0 => {
            DynamicImage::ImageRgba8(RgbaImage::from_fn(w as u32, h as u32, |x, y| {
                let (x, y) = (x as usize, y as usize);
                Rgba([0, 1, 2, 3].map(|c| slice[[y, x, c]].to_u8()))
            }))
        }
        other => {
            return Err(format!(
                "Cannot encode slice of shape {other:?} as {}",
                path.display()
            ))
        }
    };
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Leading axes that address 2-D slices of a tensor with `shape`.
///
/// Every axis but the trailing two is a key axis, or every axis but the
/// trailing three when the last axis has 1, 3 or 4 channels.
pub fn slice_key_axes(shape: &[usize]) -> usize {
    match shape {
        [.., 1 | 3 | 4] if shape.len() >= 3 => shape.len() - 3,
        _ => shape.len().saturating_sub(2),
    }
}

/// Write every record of `tensor` into `base_path` as `<key>.<ext>`.
///
/// The directory is created; if it already exists the call fails unless
/// `allow_overwrite` is set. Slices are encoded in parallel. Returns the
/// directory written to.
pub fn save_tensor_local<T, S, D>(
    tensor: &ArrayBase<S, D>,
    base_path: &Path,
    options: &SaveOptions,
) -> Result<PathBuf, String>
where
    T: GrayPixel + Send + Sync,
    S: Data<Elem = T>,
    D: Dimension,
{
    ensure_parent_dir(base_path)?;
    match fs::create_dir(base_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            warn!("{} already exists", base_path.display());
            if !options.allow_overwrite {
                return Err(format!(
                    "Overwriting has not been enabled, remove directory {}",
                    base_path.display()
                ));
            }
        }
        Err(e) => return Err(format!("Failed to create {}: {e}", base_path.display())),
    }

    let key_axes = options
        .key_axes
        .unwrap_or_else(|| slice_key_axes(tensor.shape()));
    let records = tensor::to_records(tensor, key_axes).map_err(|e| e.to_string())?;
    records.par_iter().try_for_each(|record| {
        let path = base_path.join(tensor::slice_file_name(&record.key, &options.file_ext));
        save_slice(record.data.view(), &path)
    })?;
    debug!(
        "save_tensor_local: wrote {} slices to {}",
        records.len(),
        base_path.display()
    );
    Ok(base_path.to_path_buf())
}

#[derive(Serialize)]
struct RecordRow {
    position: Vec<usize>,
    array_data: Value,
}

/// Nested JSON lists mirroring the array's axes.
fn nested_value<T: Serialize>(view: ArrayViewD<'_, T>) -> Result<Value, serde_json::Error> {
    if view.ndim() == 0 {
        return match view.iter().next() {
            Some(v) => serde_json::to_value(v),
            None => Ok(Value::Null),
        };
    }
    view.outer_iter()
        .map(nested_value)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Write `[{ "position": key, "array_data": nested lists }]` rows for every record.
pub fn write_records_json<T, S, D>(
    tensor: &ArrayBase<S, D>,
    key_axes: usize,
    path: &Path,
) -> Result<(), String>
where
    T: Clone + Serialize,
    S: Data<Elem = T>,
    D: Dimension,
{
    let rows = tensor::to_records(tensor, key_axes)
        .map_err(|e| e.to_string())?
        .into_iter()
        .map(|record| {
            Ok(RecordRow {
                array_data: nested_value(record.data.view())?,
                position: record.key,
            })
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()
        .map_err(|e| format!("Failed to serialize records for {}: {e}", path.display()))?;
    write_json_file(path, &rows)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
