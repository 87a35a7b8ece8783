//! FFT wrapper for 2D transforms using rustfft
//!
//! Provides 2D FFT/IFFT operations compatible with NumPy's FFT conventions.
//! Images are stored row-major: element (y, x) lives at `y * width + x`.

use num_complex::Complex64;
use rustfft::{Fft, FftDirection, FftPlanner};
use std::sync::Arc;

/// FFT workspace that caches plans and scratch buffers for one grid size
pub struct Fft2dWorkspace {
    height: usize,
    width: usize,
    n_total: usize,
    // Forward FFT plans
    fft_x: Arc<dyn Fft<f64>>,
    fft_y: Arc<dyn Fft<f64>>,
    // Inverse FFT plans
    ifft_x: Arc<dyn Fft<f64>>,
    ifft_y: Arc<dyn Fft<f64>>,
    // Scratch buffers
    scratch_x: Vec<Complex64>,
    scratch_y: Vec<Complex64>,
    buffer_y: Vec<Complex64>,
}

impl Fft2dWorkspace {
    /// Create a new FFT workspace for a `height x width` grid
    pub fn new(height: usize, width: usize) -> Self {
        let mut planner = FftPlanner::new();

        let fft_x = planner.plan_fft(width, FftDirection::Forward);
        let fft_y = planner.plan_fft(height, FftDirection::Forward);

        let ifft_x = planner.plan_fft(width, FftDirection::Inverse);
        let ifft_y = planner.plan_fft(height, FftDirection::Inverse);

        let scratch_x = vec![Complex64::new(0.0, 0.0); fft_x.get_inplace_scratch_len().max(ifft_x.get_inplace_scratch_len())];
        let scratch_y = vec![Complex64::new(0.0, 0.0); fft_y.get_inplace_scratch_len().max(ifft_y.get_inplace_scratch_len())];

        log::debug!("planned {}x{} FFT workspace", width, height);

        Self {
            height,
            width,
            n_total: height * width,
            fft_x, fft_y,
            ifft_x, ifft_y,
            scratch_x, scratch_y,
            buffer_y: vec![Complex64::new(0.0, 0.0); height],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// In-place forward 2D FFT, matches numpy.fft.fft2
    pub fn fft2d(&mut self, data: &mut [Complex64]) {
        debug_assert_eq!(data.len(), self.n_total);

        // Rows are contiguous, rustfft walks them in width-sized chunks
        self.fft_x.process_with_scratch(data, &mut self.scratch_x);

        // Transform along y-axis (stride width)
        let (height, width) = (self.height, self.width);
        for x in 0..width {
            for y in 0..height {
                self.buffer_y[y] = data[idx2d(y, x, width)];
            }
            self.fft_y.process_with_scratch(&mut self.buffer_y, &mut self.scratch_y);
            for y in 0..height {
                data[idx2d(y, x, width)] = self.buffer_y[y];
            }
        }
    }

    /// In-place inverse 2D FFT with 1/N normalization, matches numpy.fft.ifft2
    pub fn ifft2d(&mut self, data: &mut [Complex64]) {
        debug_assert_eq!(data.len(), self.n_total);
        let n_total = self.n_total as f64;

        self.ifft_x.process_with_scratch(data, &mut self.scratch_x);

        let (height, width) = (self.height, self.width);
        for x in 0..width {
            for y in 0..height {
                self.buffer_y[y] = data[idx2d(y, x, width)];
            }
            self.ifft_y.process_with_scratch(&mut self.buffer_y, &mut self.scratch_y);
            for y in 0..height {
                data[idx2d(y, x, width)] = self.buffer_y[y];
            }
        }

        // Normalize
        for val in data.iter_mut() {
            *val /= n_total;
        }
    }

    /// Apply a real frequency-domain filter in-place: data = ifft(K * fft(data))
    #[inline]
    pub fn apply_kernel_inplace(&mut self, data: &mut [Complex64], kernel: &[f64]) {
        self.fft2d(data);

        for (c, &k) in data.iter_mut().zip(kernel.iter()) {
            *c *= k;
        }

        self.ifft2d(data);
    }
}

/// Index into a 2D array stored row-major: index = x + y*width
#[inline(always)]
pub fn idx2d(y: usize, x: usize, width: usize) -> usize {
    x + y * width
}

/// Move the zero frequency from index (0, 0) to (height/2, width/2)
///
/// Matches numpy.fft.fftshift, including odd sizes.
pub fn fftshift2d<T: Copy>(data: &[T], height: usize, width: usize) -> Vec<T> {
    roll2d(data, height, width, height / 2, width / 2)
}

/// Inverse of [`fftshift2d`], matches numpy.fft.ifftshift
pub fn ifftshift2d<T: Copy>(data: &[T], height: usize, width: usize) -> Vec<T> {
    roll2d(data, height, width, height - height / 2, width - width / 2)
}

/// Circular shift: element (y, x) moves to ((y + dy) % height, (x + dx) % width)
fn roll2d<T: Copy>(data: &[T], height: usize, width: usize, dy: usize, dx: usize) -> Vec<T> {
    let mut out = data.to_vec();
    for y in 0..height {
        let ty = (y + dy) % height;
        for x in 0..width {
            out[idx2d(ty, (x + dx) % width, width)] = data[idx2d(y, x, width)];
        }
    }
    out
}

/// Signed integer frequency of FFT bin `k` on an axis of length `n`
///
/// Same ordering as numpy.fft.fftfreq(n) * n: DC at 0, then the positive
/// frequencies, with the negative ones wrapped onto the upper half.
#[inline]
pub fn fft_index(k: usize, n: usize) -> f64 {
    if k < (n + 1) / 2 {
        k as f64
    } else {
        k as f64 - n as f64
    }
}
