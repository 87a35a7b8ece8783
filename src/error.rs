//! Error types for hologram reconstruction
//!
//! Every failure here is a deterministic function of the caller's input
//! shape or parameters, so nothing is retried and no partial result is
//! ever returned.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result type for reconstruction operations
pub type HoloResult<T> = Result<T, HoloError>;

/// Errors raised by the extractor, the unwrapper and the pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoloError {
    /// Sideband window reaches past the spectrum edges
    #[error(
        "sideband window centred at ({center_x}, {center_y}) with radius {radius} \
         exceeds the {width}x{height} spectrum"
    )]
    OutOfBounds {
        center_x: usize,
        center_y: usize,
        radius: usize,
        width: usize,
        height: usize,
    },

    /// Zero-sized or mismatched array dimensions
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Wrapped phase sample outside [-pi, pi] or not finite
    #[error("wrapped phase {value} at index {index} lies outside [-pi, pi]")]
    InvalidPhaseRange { index: usize, value: f64 },
}

impl From<HoloError> for JsValue {
    fn from(e: HoloError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Check that a flat buffer describes a non-empty `height x width` grid
pub fn check_dims(len: usize, height: usize, width: usize) -> HoloResult<()> {
    if height == 0 || width == 0 {
        return Err(HoloError::DegenerateInput(format!(
            "empty grid {}x{}",
            width, height
        )));
    }
    if len != height * width {
        return Err(HoloError::DegenerateInput(format!(
            "buffer holds {} samples, expected {}x{} = {}",
            len,
            width,
            height,
            height * width
        )));
    }
    Ok(())
}
