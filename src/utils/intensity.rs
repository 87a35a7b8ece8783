//! Conversion of 8-bit camera frames into intensity images

use crate::error::{check_dims, HoloError, HoloResult};

/// Normalize 8-bit grey levels to [0, 1]
pub fn intensity_from_u8(pixels: &[u8]) -> Vec<f64> {
    pixels.iter().map(|&p| p as f64 / 255.0).collect()
}

/// Pick the red channel of an interleaved RGBA frame, normalized to [0, 1]
///
/// Off-axis setups with a red laser carry the fringes in this channel only.
pub fn red_channel_from_rgba(rgba: &[u8], height: usize, width: usize) -> HoloResult<Vec<f64>> {
    if rgba.len() % 4 != 0 {
        return Err(HoloError::DegenerateInput(format!(
            "RGBA buffer length {} is not a multiple of 4",
            rgba.len()
        )));
    }
    check_dims(rgba.len() / 4, height, width)?;

    Ok(rgba.chunks_exact(4).map(|px| px[0] as f64 / 255.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_from_u8() {
        assert_eq!(intensity_from_u8(&[0, 255, 51]), vec![0.0, 1.0, 0.2]);
    }

    #[test]
    fn test_red_channel_from_rgba() {
        let rgba = [255, 1, 2, 255, 0, 9, 9, 255];
        let red = red_channel_from_rgba(&rgba, 1, 2).unwrap();
        assert_eq!(red, vec![1.0, 0.0]);
    }

    #[test]
    fn test_red_channel_rejects_bad_lengths() {
        assert!(matches!(
            red_channel_from_rgba(&[1, 2, 3], 1, 1),
            Err(HoloError::DegenerateInput(_))
        ));
        assert!(matches!(
            red_channel_from_rgba(&[0; 8], 2, 2),
            Err(HoloError::DegenerateInput(_))
        ));
    }
}
