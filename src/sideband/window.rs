//! Sideband crop window
//!
//! A square region of the centred spectrum that holds one of the two
//! conjugate sidebands. Bounds are checked, never clamped.

use crate::error::{HoloError, HoloResult};

/// Default half-width, sized for 1024px bench frames
pub const DEFAULT_SIDEBAND_RADIUS: usize = 80;

/// Square crop of the shifted spectrum, `2 * radius` samples on a side
///
/// Coordinates index the frequency-shifted spectrum, where DC sits at
/// `(height / 2, width / 2)`. The crop covers rows
/// `center_y - radius .. center_y + radius` and the matching columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebandWindow {
    pub center_x: usize,
    pub center_y: usize,
    pub radius: usize,
}

impl SidebandWindow {
    pub fn new(center_x: usize, center_y: usize, radius: usize) -> Self {
        Self { center_x, center_y, radius }
    }

    /// Window of [`DEFAULT_SIDEBAND_RADIUS`] around the given centre
    pub fn with_default_radius(center_x: usize, center_y: usize) -> Self {
        Self::new(center_x, center_y, DEFAULT_SIDEBAND_RADIUS)
    }

    /// Check the window lies fully inside a `height x width` spectrum
    ///
    /// Never clamps: a window that would be cut at the edge selects a
    /// different frequency band than the caller asked for.
    pub fn validate(&self, height: usize, width: usize) -> HoloResult<()> {
        if self.radius == 0 {
            return Err(HoloError::DegenerateInput(
                "sideband window radius must be at least 1".to_string(),
            ));
        }

        // Subtract rather than add, centres may sit near usize::MAX
        let fits = |center: usize, extent: usize| {
            center >= self.radius && self.radius <= extent.saturating_sub(center)
        };

        if fits(self.center_y, height) && fits(self.center_x, width) {
            Ok(())
        } else {
            Err(HoloError::OutOfBounds {
                center_x: self.center_x,
                center_y: self.center_y,
                radius: self.radius,
                width,
                height,
            })
        }
    }
}
