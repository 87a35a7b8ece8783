//! Radial frequency kernel for the frequency-domain Poisson solve
//!
//! The discrete Laplacian is diagonal in Fourier space. Up to a constant
//! scale that cancels inside the Volkov-Zhu formula, its eigenvalue at bin
//! (ky, kx) is -(ky² + kx²) in integer frequency units, so this kernel is
//! the (negated) Laplacian and its reciprocal is the Green's function.

use crate::fft::{fft_index, idx2d};

/// Offset added to every kernel value so the DC bin is never exactly zero.
///
/// The DC eigenvalue of the Laplacian is 0; dividing by it would turn the
/// whole solution into NaN. The offset only touches the DC term noticeably,
/// every other bin is at least 1.
pub const KERNEL_EPSILON: f64 = 1e-10;

/// Generate the radial frequency kernel `r2` in FFT layout
///
/// `r2[y, x] = fft_index(y)² + fft_index(x)² + KERNEL_EPSILON`, with DC at
/// index (0, 0) and negative frequencies wrapped onto the upper half of
/// each axis.
///
/// # Arguments
/// * `height`, `width` - Grid dimensions (the mirror-extended domain)
///
/// # Returns
/// Flattened kernel of size height*width in row-major order
pub fn radial_frequency_kernel(height: usize, width: usize) -> Vec<f64> {
    let mut r2 = vec![0.0; height * width];

    for y in 0..height {
        let ky = fft_index(y, height);
        let ky2 = ky * ky;

        for x in 0..width {
            let kx = fft_index(x, width);
            r2[idx2d(y, x, width)] = ky2 + kx * kx + KERNEL_EPSILON;
        }
    }

    r2
}
