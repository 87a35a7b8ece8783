//! Sideband selection and extraction
//!
//! An off-axis hologram's spectrum holds a DC lobe and two conjugate
//! sidebands around the carrier frequency. This module:
//! - Describes the selection window (`SidebandWindow`)
//! - Extracts the wrapped phase encoded in one sideband
//! - Computes the log-magnitude spectrum used to choose the window
//! - Locates the sideband peak automatically

pub mod window;
pub mod extract;
pub mod detect;

pub use window::*;
pub use extract::*;
pub use detect::*;
