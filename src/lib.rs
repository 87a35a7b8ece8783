//! HOLO-WASM: WebAssembly-accelerated off-axis hologram phase reconstruction
//!
//! This crate recovers a continuous phase map from a single off-axis
//! hologram or interferogram, compiled to WebAssembly for browser use.
//!
//! # Modules
//! - `fft`: 2D FFT operations using rustfft
//! - `kernels`: Radial frequency kernel for the Poisson solve
//! - `sideband`: Sideband window, extraction, spectrum and peak detection
//! - `unwrap`: Volkov-Zhu frequency-domain phase unwrapping
//! - `pipeline`: Reusable image -> unwrapped phase reconstructor
//! - `utils`: Phase helpers, mirror extension, 8-bit intensity conversion

// Core modules
pub mod error;
pub mod fft;

// Algorithm modules
pub mod kernels;
pub mod sideband;
pub mod unwrap;
pub mod pipeline;
pub mod utils;

pub use error::{HoloError, HoloResult};
pub use pipeline::{reconstruct, Reconstructor};
pub use sideband::{detect_sideband, extract, magnitude_spectrum, SidebandWindow};
pub use unwrap::{volkov_zhu_unwrap, VolkovZhuUnwrapper};

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log_str(s: &str);
}

#[allow(unused_macros)]
macro_rules! console_log {
    ($($t:tt)*) => (console_log_str(&format_args!($($t)*).to_string()))
}

/// Forwards `log` records to the browser console
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            console_log_str(&format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (or a host-installed logger) keeps the existing one
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

// ============================================================================
// WASM Exports: Sideband Extraction
// ============================================================================

/// Extract the wrapped phase of one sideband
///
/// # Arguments
/// * `image` - Float64Array of intensities (height * width), row-major
/// * `height`, `width` - Image dimensions
/// * `center_x`, `center_y` - Sideband centre in the shifted spectrum
/// * `radius` - Half-width of the square crop
///
/// # Returns
/// Wrapped phase in (-π, π]
#[wasm_bindgen]
pub fn extract_wasm(
    image: &[f64],
    height: usize, width: usize,
    center_x: usize, center_y: usize, radius: usize,
) -> Result<Vec<f64>, JsValue> {
    console_log!("WASM extract: {}x{}, window=({},{}) r={}",
                 width, height, center_x, center_y, radius);

    let window = SidebandWindow::new(center_x, center_y, radius);
    let wrapped = sideband::extract(image, height, width, &window)?;

    console_log!("WASM extract complete");
    Ok(wrapped)
}

/// Log-magnitude spectrum (DC centred) for choosing the sideband
#[wasm_bindgen]
pub fn magnitude_spectrum_wasm(
    image: &[f64],
    height: usize, width: usize,
) -> Result<Vec<f64>, JsValue> {
    console_log!("WASM magnitude_spectrum: {}x{}", width, height);
    Ok(sideband::magnitude_spectrum(image, height, width)?)
}

/// Locate the sideband right of DC
///
/// # Returns
/// `[center_x, center_y, radius]`
#[wasm_bindgen]
pub fn detect_sideband_wasm(
    image: &[f64],
    height: usize, width: usize,
    dc_exclusion: usize, radius: usize,
) -> Result<Vec<u32>, JsValue> {
    console_log!("WASM detect_sideband: {}x{}, dc_exclusion={}", width, height, dc_exclusion);

    let w = sideband::detect_sideband(image, height, width, dc_exclusion, radius)?;

    console_log!("WASM sideband at ({}, {})", w.center_x, w.center_y);
    window_to_u32(&w).map_err(JsValue::from)
}

/// `[center_x, center_y, radius]` as u32, refusing values that would truncate
fn window_to_u32(w: &SidebandWindow) -> HoloResult<Vec<u32>> {
    [w.center_x, w.center_y, w.radius]
        .iter()
        .map(|&v| {
            u32::try_from(v).map_err(|_| {
                HoloError::DegenerateInput(format!("window coordinate {} does not fit in u32", v))
            })
        })
        .collect()
}

// ============================================================================
// WASM Exports: Phase Unwrapping
// ============================================================================

/// Volkov-Zhu phase unwrapping
///
/// # Arguments
/// * `wrapped` - Wrapped phase in [-π, π] (height * width)
/// * `height`, `width` - Array dimensions
///
/// # Returns
/// Unwrapped phase
#[wasm_bindgen]
pub fn unwrap_wasm(
    wrapped: &[f64],
    height: usize, width: usize,
) -> Result<Vec<f64>, JsValue> {
    console_log!("WASM unwrap: {}x{}", width, height);

    let unwrapped = unwrap::volkov_zhu_unwrap(wrapped, height, width)?;

    console_log!("WASM unwrap complete");
    Ok(unwrapped)
}

// ============================================================================
// WASM Exports: Full Reconstruction
// ============================================================================

/// Intensity image -> unwrapped phase
#[wasm_bindgen]
pub fn reconstruct_wasm(
    image: &[f64],
    height: usize, width: usize,
    center_x: usize, center_y: usize, radius: usize,
) -> Result<Vec<f64>, JsValue> {
    console_log!("WASM reconstruct: {}x{}, window=({},{}) r={}",
                 width, height, center_x, center_y, radius);

    let window = SidebandWindow::new(center_x, center_y, radius);
    let unwrapped = pipeline::reconstruct(image, height, width, &window)?;

    console_log!("WASM reconstruct complete");
    Ok(unwrapped)
}

/// 8-bit greyscale frame -> unwrapped phase
#[wasm_bindgen]
pub fn reconstruct_gray_wasm(
    pixels: &[u8],
    height: usize, width: usize,
    center_x: usize, center_y: usize, radius: usize,
) -> Result<Vec<f64>, JsValue> {
    let image = utils::intensity::intensity_from_u8(pixels);
    reconstruct_wasm(&image, height, width, center_x, center_y, radius)
}

/// RGBA frame (e.g. canvas ImageData) -> unwrapped phase of the red channel
#[wasm_bindgen]
pub fn reconstruct_rgba_wasm(
    rgba: &[u8],
    height: usize, width: usize,
    center_x: usize, center_y: usize, radius: usize,
) -> Result<Vec<f64>, JsValue> {
    let image = utils::intensity::red_channel_from_rgba(rgba, height, width)?;
    reconstruct_wasm(&image, height, width, center_x, center_y, radius)
}

/// Reconstructor keeping FFT plans alive across frames of one size
#[wasm_bindgen]
pub struct HoloReconstructor {
    inner: Reconstructor,
}

#[wasm_bindgen]
impl HoloReconstructor {
    #[wasm_bindgen(constructor)]
    pub fn new(height: usize, width: usize) -> Result<HoloReconstructor, JsValue> {
        console_log!("WASM HoloReconstructor: {}x{}", width, height);
        Ok(Self { inner: Reconstructor::new(height, width)? })
    }

    pub fn extract(
        &mut self,
        image: &[f64],
        center_x: usize, center_y: usize, radius: usize,
    ) -> Result<Vec<f64>, JsValue> {
        let window = SidebandWindow::new(center_x, center_y, radius);
        Ok(self.inner.extract(image, &window)?)
    }

    pub fn unwrap(&mut self, wrapped: &[f64]) -> Result<Vec<f64>, JsValue> {
        Ok(self.inner.unwrap(wrapped)?)
    }

    pub fn reconstruct(
        &mut self,
        image: &[f64],
        center_x: usize, center_y: usize, radius: usize,
    ) -> Result<Vec<f64>, JsValue> {
        let window = SidebandWindow::new(center_x, center_y, radius);
        Ok(self.inner.reconstruct(image, &window)?)
    }
}

// ============================================================================
// WASM Exports: Utilities
// ============================================================================

/// Check if WASM module is loaded and working
#[wasm_bindgen]
pub fn wasm_health_check() -> bool {
    console_log!("HOLO-WASM module loaded successfully!");
    true
}

/// Get version string
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get radial frequency kernel for visualization/debugging
#[wasm_bindgen]
pub fn get_radial_kernel(height: usize, width: usize) -> Vec<f64> {
    kernels::radial::radial_frequency_kernel(height, width)
}

// ============================================================================
// Tests
// ============================================================================
