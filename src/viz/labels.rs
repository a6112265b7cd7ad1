//! Per-label binary masks of a labeled 3-D volume.
//!
//! Label `0` is background. Asking for label `0` explicitly yields the union
//! of all labels (`labels > 0`), which is drawn as a faint outline. Masks are
//! `f32` so they can be handed to an isosurface extractor unchanged.
use log::debug;
use ndarray::{Array3, ArrayBase, Axis, Data, Ix3};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of labels turned into masks.
pub const MAX_COMPONENTS: usize = 50;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelMaskOptions {
    /// First label to extract; `0` adds the union mask first.
    pub start_label: usize,
    /// Labels above this value are skipped.
    pub max_components: usize,
    /// Reorient masks for display (see [`display_shape`]).
    pub flip: bool,
}

impl Default for LabelMaskOptions {
    fn default() -> Self {
        Self {
            start_label: 1,
            max_components: MAX_COMPONENTS,
            flip: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LabelMask {
    pub label: usize,
    /// Number of voxels set in `mask`.
    pub voxels: usize,
    /// `label / max_label`, the position of this label on a colormap.
    pub color_fraction: f32,
    pub mask: Array3<f32>,
}

/// Shape of a volume after display reorientation.
///
/// Flipping reverses axis 0, then moves axes `(0, 1, 2)` to `(1, 2, 0)`.
pub fn display_shape(shape: [usize; 3], flip: bool) -> [usize; 3] {
    if flip {
        [shape[1], shape[2], shape[0]]
    } else {
        shape
    }
}

fn orient(mask: Array3<f32>, flip: bool) -> Array3<f32> {
    if !flip {
        return mask;
    }
    let (d0, d1, d2) = mask.dim();
    let mut view = mask.view();
    view.invert_axis(Axis(0));
    let mut out = Array3::zeros(display_shape([d0, d1, d2], true));
    out.assign(&view.permuted_axes([1, 2, 0]));
    out
}

/// Build one mask per label in `start_label..=min(max_label, max_components)`.
pub fn label_masks<T, S>(labels: &ArrayBase<S, Ix3>, options: &LabelMaskOptions) -> Vec<LabelMask>
where
    T: Copy + Into<u64>,
    S: Data<Elem = T>,
{
    let max_label: u64 = labels.iter().map(|&v| v.into()).max().unwrap_or(0);
    let last = max_label.min(options.max_components as u64);

    (options.start_label as u64..=last)
        .map(|label| {
            let mask = labels.map(|&v| {
                let v: u64 = v.into();
                let hit = if label == 0 { v > 0 } else { v == label };
                if hit {
                    1.0f32
                } else {
                    0.0
                }
            });
            let voxels = mask.iter().filter(|&&m| m > 0.0).count();
            debug!("label_masks: adding label {label}, sized {voxels}");
            let color_fraction = if max_label == 0 {
                0.0
            } else {
                label as f32 / max_label as f32
            };
            LabelMask {
                label: label as usize,
                voxels,
                color_fraction,
                mask: orient(mask, options.flip),
            }
        })
        .collect()
}
