//! Volkov-Zhu frequency-domain phase unwrapping
//!
//! The Laplacian of the true phase can be written without differentiating
//! the wrapped phase itself:
//!
//!   ∇²φ = cos φ · ∇²(sin φ) − sin φ · ∇²(cos φ)
//!
//! Both sides are solved in Fourier space, where ∇² is multiplication by
//! −r². Mirror tiling the input first gives Neumann boundaries, and the
//! smooth least-squares solution is finally snapped onto the branch of
//! the measured wrapped phase.
//!
//! Reference:
//! Volkov VV, Zhu Y. Deterministic phase unwrapping in the presence of
//! noise. Optics letters. 2003 Nov 15;28(22):2156-8.

use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::error::{check_dims, HoloResult};
use crate::fft::Fft2dWorkspace;
use crate::kernels::radial::radial_frequency_kernel;
use crate::utils::mirror::{crop_top_left, mirror_extend};
use crate::utils::phase::validate_wrapped_phase;

/// Phase unwrapper holding FFT plans and the radial kernel for one size
///
/// The kernel depends only on the extended-domain dimensions, so it is
/// built once here and shared by every frame.
pub struct VolkovZhuUnwrapper {
    height: usize,
    width: usize,
    workspace: Fft2dWorkspace,
    r2: Vec<f64>,
}

impl VolkovZhuUnwrapper {
    /// Create an unwrapper for `height x width` phase maps
    pub fn new(height: usize, width: usize) -> Self {
        let (ext_h, ext_w) = (2 * height, 2 * width);
        Self {
            height,
            width,
            workspace: Fft2dWorkspace::new(ext_h, ext_w),
            r2: radial_frequency_kernel(ext_h, ext_w),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Unwrap a phase map
    ///
    /// # Arguments
    /// * `wrapped` - Wrapped phase in [-π, π] (height * width), row-major
    ///
    /// # Returns
    /// Unwrapped phase, congruent to `wrapped` modulo 2π at every pixel
    pub fn unwrap(&mut self, wrapped: &[f64]) -> HoloResult<Vec<f64>> {
        check_dims(wrapped.len(), self.height, self.width)?;
        validate_wrapped_phase(wrapped)?;

        let phi = self.least_squares_phase(wrapped);

        // Keep the measured value, take only the 2π branch from phi
        Ok(wrapped.iter()
            .zip(phi.iter())
            .map(|(&w, &p)| w + TAU * ((p - w) / TAU).round())
            .collect())
    }

    /// Smooth phase from the Poisson solve on the mirror-extended domain
    fn least_squares_phase(&mut self, wrapped: &[f64]) -> Vec<f64> {
        let (extended, _, ext_w) = mirror_extend(wrapped, self.height, self.width);

        // cos φ and sin φ ride in one complex array: r2 is real and even,
        // so filtering keeps the real and imaginary parts apart
        let mut filtered: Vec<Complex64> = extended.iter()
            .map(|&p| Complex64::from_polar(1.0, p))
            .collect();
        self.workspace.apply_kernel_inplace(&mut filtered, &self.r2);

        // cos·F⁻¹(r2·F(sin)) − sin·F⁻¹(r2·F(cos))
        let mut rhs: Vec<Complex64> = extended.iter()
            .zip(filtered.iter())
            .map(|(&p, f)| {
                let (sin, cos) = p.sin_cos();
                Complex64::new(cos * f.im - sin * f.re, 0.0)
            })
            .collect();

        // Green's function: divide by r2
        self.workspace.fft2d(&mut rhs);
        for (c, &k) in rhs.iter_mut().zip(self.r2.iter()) {
            *c /= k;
        }
        self.workspace.ifft2d(&mut rhs);

        let phi: Vec<f64> = rhs.iter().map(|c| c.re).collect();
        crop_top_left(&phi, ext_w, self.height, self.width)
    }
}

/// Volkov-Zhu phase unwrapping (one-shot form)
///
/// # Arguments
/// * `wrapped` - Wrapped phase in [-π, π] (height * width)
/// * `height`, `width` - Array dimensions
///
/// # Returns
/// Unwrapped phase of the same dimensions
pub fn volkov_zhu_unwrap(wrapped: &[f64], height: usize, width: usize) -> HoloResult<Vec<f64>> {
    check_dims(wrapped.len(), height, width)?;
    VolkovZhuUnwrapper::new(height, width).unwrap(wrapped)
}
