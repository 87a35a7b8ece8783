//! Mirror extension for Neumann boundary conditions
//!
//! Tiling a field with its flipped copies makes it even about every edge,
//! so the periodic FFT solve sees zero normal derivative at the original
//! boundary instead of a wrap-around jump.

use crate::fft::idx2d;

/// Four-fold mirror tiling of a `height x width` field onto `2h x 2w`
///
/// Quadrants: top-left identity, top-right horizontal flip, bottom-left
/// vertical flip, bottom-right both flips.
///
/// # Returns
/// (extended_data, 2*height, 2*width)
pub fn mirror_extend(data: &[f64], height: usize, width: usize) -> (Vec<f64>, usize, usize) {
    let (ext_h, ext_w) = (2 * height, 2 * width);
    let mut extended = vec![0.0; ext_h * ext_w];

    for y in 0..height {
        let fy = ext_h - 1 - y;
        for x in 0..width {
            let fx = ext_w - 1 - x;
            let v = data[idx2d(y, x, width)];
            extended[idx2d(y, x, ext_w)] = v;
            extended[idx2d(y, fx, ext_w)] = v;
            extended[idx2d(fy, x, ext_w)] = v;
            extended[idx2d(fy, fx, ext_w)] = v;
        }
    }

    (extended, ext_h, ext_w)
}

/// Extract the top-left `height x width` block of a wider grid
pub fn crop_top_left<T: Copy>(
    data: &[T],
    src_width: usize,
    height: usize,
    width: usize,
) -> Vec<T> {
    let mut out = Vec::with_capacity(height * width);
    for y in 0..height {
        let start = idx2d(y, 0, src_width);
        out.extend_from_slice(&data[start..start + width]);
    }
    out
}
