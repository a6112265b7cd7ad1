use ndarray::{Array2, Array3, ArrayD, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random integer array with values in `[0, max)`.
pub fn random_array(shape: &[usize], max: i32, seed: u64) -> ArrayD<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    ArrayD::from_shape_fn(IxDyn(shape), |_| rng.gen_range(0..max))
}

/// Zero volume with a solid box of `value` over the given ranges.
pub fn box_volume(
    shape: (usize, usize, usize),
    ranges: [(usize, usize); 3],
    value: u8,
) -> Array3<u8> {
    Array3::from_shape_fn(shape, |(z, y, x)| {
        let inside = [z, y, x]
            .iter()
            .zip(ranges.iter())
            .all(|(&c, &(lo, hi))| c >= lo && c < hi);
        if inside {
            value
        } else {
            0
        }
    })
}

/// Horizontal intensity ramp from 0 to 255.
pub fn ramp_u8(height: usize, width: usize) -> Array2<u8> {
    assert!(width > 1, "ramp needs at least two columns");
    Array2::from_shape_fn((height, width), |(_, x)| (x * 255 / (width - 1)) as u8)
}
