//! Utility functions for phase reconstruction
//!
//! This module provides common utility functions:
//! - Wrapped phase helpers (wrapping, principal value, range validation)
//! - Mirror extension for Neumann boundaries
//! - 8-bit frame to intensity conversion

pub mod phase;
pub mod mirror;
pub mod intensity;

pub use phase::*;
pub use mirror::*;
pub use intensity::*;
