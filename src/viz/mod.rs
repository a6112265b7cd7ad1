//! Preparation of labeled volumes and image stacks for visualization.
//!
//! Rendering, meshing and video encoding live outside this crate; these
//! helpers produce the inputs they consume: per-label binary masks oriented
//! for display, and the frame schedules of slice-stack and rotation
//! animations.

pub mod frames;
pub mod labels;

pub use frames::{rotation_azimuths, stack_frame_indices, ROTATION_ELEVATION_DEG};
pub use labels::{display_shape, label_masks, LabelMask, LabelMaskOptions, MAX_COMPONENTS};
