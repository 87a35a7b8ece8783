//! Hologram reconstruction pipeline
//!
//! image -> sideband extraction -> wrapped phase -> Volkov-Zhu unwrap
//!
//! A `Reconstructor` owns the FFT plans of both stages, so a camera loop
//! delivering frames of one size pays the planning cost once.

use crate::error::{check_dims, HoloError, HoloResult};
use crate::sideband::{SidebandExtractor, SidebandWindow};
use crate::unwrap::VolkovZhuUnwrapper;

/// Reusable image -> unwrapped phase reconstructor for one frame size
pub struct Reconstructor {
    extractor: SidebandExtractor,
    unwrapper: VolkovZhuUnwrapper,
}

impl Reconstructor {
    /// Plan both stages for `height x width` frames
    pub fn new(height: usize, width: usize) -> HoloResult<Self> {
        if height == 0 || width == 0 {
            return Err(HoloError::DegenerateInput(format!(
                "cannot plan a reconstructor for {}x{} frames",
                width, height
            )));
        }

        log::debug!("planning reconstructor for {}x{} frames", width, height);
        Ok(Self {
            extractor: SidebandExtractor::new(height, width),
            unwrapper: VolkovZhuUnwrapper::new(height, width),
        })
    }

    pub fn height(&self) -> usize {
        self.extractor.height()
    }

    pub fn width(&self) -> usize {
        self.extractor.width()
    }

    /// Wrapped phase of the selected sideband
    pub fn extract(&mut self, image: &[f64], window: &SidebandWindow) -> HoloResult<Vec<f64>> {
        self.extractor.extract(image, window)
    }

    /// Unwrap a phase map of this reconstructor's size
    pub fn unwrap(&mut self, wrapped: &[f64]) -> HoloResult<Vec<f64>> {
        self.unwrapper.unwrap(wrapped)
    }

    /// Full reconstruction: unwrapped phase of the selected sideband
    pub fn reconstruct(&mut self, image: &[f64], window: &SidebandWindow) -> HoloResult<Vec<f64>> {
        let wrapped = self.extractor.extract(image, window)?;
        log::info!(
            "wrapped phase extracted ({}x{})",
            self.width(), self.height()
        );

        let unwrapped = self.unwrapper.unwrap(&wrapped)?;
        log::info!("phase unwrapped");

        Ok(unwrapped)
    }

    /// Log-magnitude spectrum for choosing the sideband window
    pub fn magnitude_spectrum(&mut self, image: &[f64]) -> HoloResult<Vec<f64>> {
        self.extractor.magnitude_spectrum(image)
    }

    /// Locate the sideband right of DC, see [`SidebandExtractor::detect`]
    pub fn detect_sideband(
        &mut self,
        image: &[f64],
        dc_exclusion: usize,
        radius: usize,
    ) -> HoloResult<SidebandWindow> {
        self.extractor.detect(image, dc_exclusion, radius)
    }
}

/// Reconstruct the unwrapped phase of one image (one-shot form)
pub fn reconstruct(
    image: &[f64],
    height: usize,
    width: usize,
    window: &SidebandWindow,
) -> HoloResult<Vec<f64>> {
    check_dims(image.len(), height, width)?;
    Reconstructor::new(height, width)?.reconstruct(image, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::idx2d;
    use std::f64::consts::{PI, TAU};

    const H: usize = 32;
    const W: usize = 64;
    const CARRIER: usize = 16;

    /// Carrier along x plus a tilt of four fringes along y
    fn tilted_hologram() -> (Vec<f64>, Vec<f64>) {
        let mut image = vec![0.0; H * W];
        let mut truth = vec![0.0; H * W];
        for y in 0..H {
            for x in 0..W {
                let phi = PI / 4.0 * y as f64;
                let carrier = 2.0 * PI * (CARRIER * x) as f64 / W as f64;
                image[idx2d(y, x, W)] = 1.0 + (carrier + phi).cos();
                truth[idx2d(y, x, W)] = phi;
            }
        }
        (image, truth)
    }

    #[test]
    fn test_reconstruct_recovers_tilt() {
        let (image, truth) = tilted_hologram();
        let window = SidebandWindow::new(W / 2 + CARRIER, H / 2, 8);
        let unwrapped = reconstruct(&image, H, W, &window).unwrap();

        assert_eq!(unwrapped.len(), H * W);
        let offset = ((unwrapped[0] - truth[0]) / TAU).round();
        for (i, (&t, &u)) in truth.iter().zip(unwrapped.iter()).enumerate() {
            assert!(
                (u - t - offset * TAU).abs() < 1e-6,
                "pixel {}: expected {} (+{}·2π), got {}",
                i, t, offset, u
            );
        }
    }

    #[test]
    fn test_reconstructor_matches_stages() {
        let (image, _) = tilted_hologram();
        let window = SidebandWindow::new(W / 2 + CARRIER, H / 2, 8);
        let mut rec = Reconstructor::new(H, W).unwrap();

        let wrapped = rec.extract(&image, &window).unwrap();
        let staged = rec.unwrap(&wrapped).unwrap();
        let direct = rec.reconstruct(&image, &window).unwrap();
        assert_eq!(staged, direct);
    }

    #[test]
    fn test_detected_window_feeds_reconstruction() {
        let (image, _) = tilted_hologram();
        let mut rec = Reconstructor::new(H, W).unwrap();

        // The tilt moves the peak off the carrier row; centring on it
        // removes the tilt, leaving a flat phase
        let window = rec.detect_sideband(&image, 4, 8).unwrap();
        assert_eq!(window, SidebandWindow::new(W / 2 + CARRIER, H / 2 + 4, 8));

        let unwrapped = rec.reconstruct(&image, &window).unwrap();
        for &u in &unwrapped {
            assert!((u - unwrapped[0]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_frame_size_mismatch() {
        let mut rec = Reconstructor::new(H, W).unwrap();
        let window = SidebandWindow::new(8, 8, 4);
        assert!(matches!(
            rec.reconstruct(&vec![0.0; 16 * 16], &window),
            Err(HoloError::DegenerateInput(_))
        ));
        assert!(matches!(Reconstructor::new(0, 8), Err(HoloError::DegenerateInput(_))));
    }

    #[test]
    fn test_out_of_bounds_surfaces_through_pipeline() {
        let (image, _) = tilted_hologram();
        let window = SidebandWindow::new(W / 2 + CARRIER, H - 2, 8);
        assert!(matches!(
            reconstruct(&image, H, W, &window),
            Err(HoloError::OutOfBounds { .. })
        ));
    }
}
