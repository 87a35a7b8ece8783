//! Automatic sideband location
//!
//! Picks the strongest spectral peak right of DC, outside a disc around
//! DC that holds the unmodulated background. Restricting the search to
//! one half-plane fixes which of the two conjugate sidebands is returned,
//! so the recovered phase keeps the `+phi` convention of the extractor.

use crate::error::{check_dims, HoloError, HoloResult};
use crate::fft::idx2d;

use super::extract::SidebandExtractor;
use super::window::SidebandWindow;

impl SidebandExtractor {
    /// Locate the sideband peak and build a window of `radius` around it
    ///
    /// # Arguments
    /// * `image` - Intensity image (height * width)
    /// * `dc_exclusion` - Radius (in frequency bins) around DC to ignore
    /// * `radius` - Half-width of the returned window
    ///
    /// # Returns
    /// A window already validated against the spectrum bounds
    pub fn detect(
        &mut self,
        image: &[f64],
        dc_exclusion: usize,
        radius: usize,
    ) -> HoloResult<SidebandWindow> {
        let (height, width) = (self.height(), self.width());
        let spectrum = self.shifted_spectrum(image)?;

        let (cy, cx) = ((height / 2) as i64, (width / 2) as i64);
        // Squared in u128 so any usize radius fits
        let exclusion2 = (dc_exclusion as u128).pow(2);

        let mut best: Option<(usize, usize, f64)> = None;
        for y in 0..height {
            let dy = y as i64 - cy;
            for x in 0..width {
                let dx = x as i64 - cx;
                let right_half = dx > 0 || (dx == 0 && dy > 0);
                let dist2 = (dx * dx + dy * dy) as u128;
                if !right_half || dist2 <= exclusion2 {
                    continue;
                }

                let power = spectrum[idx2d(y, x, width)].norm_sqr();
                if best.map_or(true, |(_, _, p)| power > p) {
                    best = Some((y, x, power));
                }
            }
        }

        let (y, x, _) = best.ok_or_else(|| {
            HoloError::DegenerateInput(format!(
                "no spectrum bins outside DC exclusion radius {} in a {}x{} image",
                dc_exclusion, width, height
            ))
        })?;

        let window = SidebandWindow::new(x, y, radius);
        window.validate(height, width)?;

        log::debug!("detected sideband peak at ({}, {})", x, y);
        Ok(window)
    }
}

/// Locate the sideband of an image (one-shot form)
pub fn detect_sideband(
    image: &[f64],
    height: usize,
    width: usize,
    dc_exclusion: usize,
    radius: usize,
) -> HoloResult<SidebandWindow> {
    check_dims(image.len(), height, width)?;
    SidebandExtractor::new(height, width).detect(image, dc_exclusion, radius)
}
