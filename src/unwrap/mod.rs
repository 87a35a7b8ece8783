//! Phase unwrapping
//!
//! - Volkov-Zhu: transform-domain least-squares solve on a mirrored domain

pub mod volkov;

pub use volkov::*;
