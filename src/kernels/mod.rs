//! Frequency-domain kernels
//!
//! - Radial frequency kernel (negated Laplacian) for the Poisson solve

pub mod radial;

pub use radial::*;
