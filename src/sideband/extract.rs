//! Sideband extraction: image -> wrapped phase
//!
//! The selected sideband is cropped from the shifted spectrum and pasted
//! back centred on DC, which removes the carrier. The inverse transform of
//! that spectrum is the complex field whose argument is the wrapped phase.
//!
//! Sign convention: a sideband right of DC (positive x frequency) yields
//! `+phi` for an image `1 + cos(2*pi*f0*x + phi)`, its mirror yields `-phi`.
//! A window centred exactly on the carrier bin adds no constant offset.

use num_complex::Complex64;

use crate::error::{check_dims, HoloResult};
use crate::fft::{fftshift2d, idx2d, ifftshift2d, Fft2dWorkspace};
use crate::utils::phase::principal_value;

use super::window::SidebandWindow;

/// Floor added to spectrum magnitudes before taking the logarithm
pub const MAGNITUDE_FLOOR: f64 = 1e-9;

/// Sideband extractor holding FFT plans for one image size
///
/// Reusing one extractor across frames of the same size avoids re-planning
/// the transforms.
pub struct SidebandExtractor {
    workspace: Fft2dWorkspace,
}

impl SidebandExtractor {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            workspace: Fft2dWorkspace::new(height, width),
        }
    }

    pub fn height(&self) -> usize {
        self.workspace.height()
    }

    pub fn width(&self) -> usize {
        self.workspace.width()
    }

    /// Spectrum of `image` with DC moved to `(height / 2, width / 2)`
    pub fn shifted_spectrum(&mut self, image: &[f64]) -> HoloResult<Vec<Complex64>> {
        let (height, width) = (self.height(), self.width());
        check_dims(image.len(), height, width)?;

        let mut spectrum: Vec<Complex64> = image.iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect();
        self.workspace.fft2d(&mut spectrum);

        Ok(fftshift2d(&spectrum, height, width))
    }

    /// Wrapped phase of the field encoded in the selected sideband
    ///
    /// # Arguments
    /// * `image` - Intensity image (height * width), row-major
    /// * `window` - Sideband crop in shifted-spectrum coordinates
    ///
    /// # Returns
    /// Wrapped phase in (-π, π], same size as `image`
    pub fn extract(&mut self, image: &[f64], window: &SidebandWindow) -> HoloResult<Vec<f64>> {
        let (height, width) = (self.height(), self.width());
        check_dims(image.len(), height, width)?;
        window.validate(height, width)?;

        let spectrum = self.shifted_spectrum(image)?;

        // Re-centre the sideband on DC, drop everything else
        let r = window.radius;
        let (src_y, src_x) = (window.center_y - r, window.center_x - r);
        let (dst_y, dst_x) = (height / 2 - r, width / 2 - r);

        let mut cropped = vec![Complex64::new(0.0, 0.0); height * width];
        for dy in 0..2 * r {
            let src = idx2d(src_y + dy, src_x, width);
            let dst = idx2d(dst_y + dy, dst_x, width);
            cropped[dst..dst + 2 * r].copy_from_slice(&spectrum[src..src + 2 * r]);
        }

        let mut field = ifftshift2d(&cropped, height, width);
        self.workspace.ifft2d(&mut field);

        log::debug!(
            "extracted sideband at ({}, {}) r={} from {}x{} image",
            window.center_x, window.center_y, r, width, height
        );

        Ok(field.iter().map(|c| principal_value(c.im.atan2(c.re))).collect())
    }

    /// Log-magnitude of the shifted spectrum, `ln(|S| + MAGNITUDE_FLOOR)`
    pub fn magnitude_spectrum(&mut self, image: &[f64]) -> HoloResult<Vec<f64>> {
        let spectrum = self.shifted_spectrum(image)?;
        Ok(spectrum.iter().map(|c| (c.norm() + MAGNITUDE_FLOOR).ln()).collect())
    }
}

/// Extract the wrapped phase of one sideband (one-shot form)
///
/// Fails with `OutOfBounds` if the window leaves the spectrum and with
/// `DegenerateInput` on empty or mismatched dimensions, before any
/// transform runs.
pub fn extract(
    image: &[f64],
    height: usize,
    width: usize,
    window: &SidebandWindow,
) -> HoloResult<Vec<f64>> {
    check_dims(image.len(), height, width)?;
    window.validate(height, width)?;
    SidebandExtractor::new(height, width).extract(image, window)
}

/// Log-magnitude spectrum of an image (one-shot form)
pub fn magnitude_spectrum(image: &[f64], height: usize, width: usize) -> HoloResult<Vec<f64>> {
    check_dims(image.len(), height, width)?;
    SidebandExtractor::new(height, width).magnitude_spectrum(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HoloError;
    use crate::utils::phase::wrap_angle;
    use std::f64::consts::PI;

    const H: usize = 32;
    const W: usize = 64;
    const CARRIER: usize = 16;

    /// 1 + cos(2π·CARRIER·x/W + φ(y, x))
    fn hologram(phi: impl Fn(usize, usize) -> f64) -> Vec<f64> {
        let mut img = vec![0.0; H * W];
        for y in 0..H {
            for x in 0..W {
                let carrier = 2.0 * PI * (CARRIER * x) as f64 / W as f64;
                img[idx2d(y, x, W)] = 1.0 + (carrier + phi(y, x)).cos();
            }
        }
        img
    }

    fn bump(y: usize, _x: usize) -> f64 {
        0.8 * (2.0 * PI * y as f64 / H as f64).sin()
    }

    #[test]
    fn test_extract_recovers_phase() {
        let img = hologram(bump);
        let window = SidebandWindow::new(W / 2 + CARRIER, H / 2, 8);
        let phase = extract(&img, H, W, &window).unwrap();

        assert_eq!(phase.len(), H * W);
        for y in 0..H {
            for x in 0..W {
                let got = phase[idx2d(y, x, W)];
                assert!((got - bump(y, x)).abs() < 1e-6,
                    "({}, {}): expected {}, got {}", y, x, bump(y, x), got);
            }
        }
    }

    #[test]
    fn test_mirror_sideband_flips_sign() {
        let img = hologram(bump);
        let window = SidebandWindow::new(W / 2 - CARRIER, H / 2, 8);
        let phase = extract(&img, H, W, &window).unwrap();

        for y in 0..H {
            for x in 0..W {
                assert!((phase[idx2d(y, x, W)] + bump(y, x)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_extract_wrapped_tilt() {
        // Four fringes along y on top of the carrier: wraps three times
        let tilt = |y: usize, _x: usize| PI / 4.0 * y as f64;
        let img = hologram(tilt);
        let window = SidebandWindow::new(W / 2 + CARRIER, H / 2, 8);
        let phase = extract(&img, H, W, &window).unwrap();

        for (i, &p) in phase.iter().enumerate() {
            assert!(p > -PI && p <= PI, "sample {} = {} out of range", i, p);
            let expected = tilt(i / W, i % W);
            assert!(wrap_angle(p - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_extract_is_deterministic() {
        let img = hologram(bump);
        let window = SidebandWindow::new(W / 2 + CARRIER, H / 2, 6);
        let mut extractor = SidebandExtractor::new(H, W);
        let a = extractor.extract(&img, &window).unwrap();
        let b = extractor.extract(&img, &window).unwrap();
        let c = extract(&img, H, W, &window).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_extract_rejects_out_of_bounds() {
        let img = hologram(bump);
        for window in [
            SidebandWindow::new(48, H - 4, 8),
            SidebandWindow::new(W - 2, 16, 8),
            SidebandWindow::new(3, 16, 8),
            SidebandWindow::new(usize::MAX, 16, 1),
            SidebandWindow::new(48, usize::MAX, 1),
        ] {
            assert!(matches!(
                extract(&img, H, W, &window),
                Err(HoloError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_extract_rejects_bad_dims() {
        let window = SidebandWindow::new(2, 2, 1);
        assert!(matches!(
            extract(&[1.0; 10], 4, 4, &window),
            Err(HoloError::DegenerateInput(_))
        ));
        assert!(matches!(
            extract(&[], 0, 4, &window),
            Err(HoloError::DegenerateInput(_))
        ));

        let mut extractor = SidebandExtractor::new(4, 4);
        assert!(matches!(
            extractor.extract(&[0.0; 20], &window),
            Err(HoloError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_odd_sizes_recentre_exactly() {
        // A misplaced DC after the inverse shift would show up as a phase ramp
        let (h, w) = (15, 21);
        let img: Vec<f64> = (0..h * w)
            .map(|i| 1.0 + (2.0 * PI * 5.0 * (i % w) as f64 / w as f64 + 0.7).cos())
            .collect();
        let window = SidebandWindow::new(w / 2 + 5, h / 2, 3);
        let phase = extract(&img, h, w, &window).unwrap();

        for (i, p) in phase.iter().enumerate() {
            assert!((p - 0.7).abs() < 1e-9, "sample {} = {}", i, p);
        }
    }

    #[test]
    fn test_magnitude_spectrum() {
        let zeros = magnitude_spectrum(&vec![0.0; H * W], H, W).unwrap();
        for v in zeros {
            assert_eq!(v, MAGNITUDE_FLOOR.ln());
        }

        // Carrier peak sits CARRIER bins right of DC
        let img = hologram(|_, _| 0.0);
        let mag = magnitude_spectrum(&img, H, W).unwrap();
        let peak = mag[idx2d(H / 2, W / 2 + CARRIER, W)];
        let off = mag[idx2d(H / 2, W / 2 + CARRIER + 3, W)];
        assert!(peak > off + 10.0, "peak {} vs background {}", peak, off);
    }
}
