//! Wrapped phase helpers

use std::f64::consts::{PI, TAU};

use crate::error::{HoloError, HoloResult};

/// Slack allowed past ±π when validating wrapped phase.
///
/// Covers phase maps that went through single precision, where `π as f32`
/// rounds slightly above π.
pub const PHASE_RANGE_TOLERANCE: f64 = 1e-6;

/// Wrap angle to (-π, π]
#[cfg(test)]
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI {
        a - TAU
    } else {
        a
    }
}

/// Fold an `atan2` result into (-π, π]
///
/// `atan2(-0.0, x < 0)` yields exactly -π, which names the same angle as π.
#[inline]
pub fn principal_value(angle: f64) -> f64 {
    if angle <= -PI {
        angle + TAU
    } else {
        angle
    }
}

/// Reject samples that are not finite or lie outside [-π, π]
pub fn validate_wrapped_phase(phase: &[f64]) -> HoloResult<()> {
    let limit = PI + PHASE_RANGE_TOLERANCE;
    match phase.iter().position(|v| !v.is_finite() || v.abs() > limit) {
        Some(index) => Err(HoloError::InvalidPhaseRange {
            index,
            value: phase[index],
        }),
        None => Ok(()),
    }
}
