//! Frame schedules for slice-stack and rotation animations.

/// Camera elevation used for rotation animations, in degrees.
pub const ROTATION_ELEVATION_DEG: f32 = 45.0;
/// Azimuth sweep covered by a rotation animation, in degrees.
pub const ROTATION_SWEEP_DEG: f32 = 180.0;

/// `num` evenly spaced samples over `[start, stop]`, endpoints included.
fn linspace(start: f64, stop: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (stop - start) / (num - 1) as f64
    } else {
        0.0
    };
    (0..num).map(move |i| start + step * i as f64)
}

/// Slice index shown in each frame of a stack animation over `depth` slices.
///
/// Without `bounce` this is `frames` samples from the first to the last slice,
/// truncated to integers. With `bounce` half as many samples play forward and
/// then in reverse.
pub fn stack_frame_indices(depth: usize, frames: usize, bounce: bool) -> Vec<usize> {
    if depth == 0 {
        return Vec::new();
    }
    let forward_frames = if bounce { frames / 2 } else { frames };
    let mut indices: Vec<usize> = linspace(0.0, (depth - 1) as f64, forward_frames)
        .map(|v| v as usize)
        .collect();
    if bounce {
        let back: Vec<usize> = indices.iter().rev().copied().collect();
        indices.extend(back);
    }
    indices
}

/// Azimuth (degrees) of each frame of a rotation animation.
pub fn rotation_azimuths(frames: usize) -> Vec<f32> {
    linspace(0.0, ROTATION_SWEEP_DEG as f64, frames)
        .map(|v| v as f32)
        .collect()
}
