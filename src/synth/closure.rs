//! Closure analysis for trochoid curves.
//!
//! A hypotrochoid or epicycloid closes after the rolling circle has made a
//! whole number of revolutions around the fixed circle. Scaling both radii
//! to integers at 3-decimal precision turns that into least-common-multiple
//! arithmetic, exact for rational radius ratios expressed at that scale.

use std::f64::consts::TAU;

use crate::curve::CurveDomain;
use crate::error::ClosureApproximation;
use crate::fragment::round_to;
use crate::math::lcm;

/// Hard ceiling on the derived sampling resolution.
pub const ITERATION_CEILING: u32 = 10_000;

/// Factor scaling radii to integers (3-decimal precision).
const RADIUS_SCALE: f64 = 1000.0;

/// Sample density per unit of parameter angle.
const SAMPLES_PER_RADIAN: f64 = 10.0;

/// Result of closure analysis: the parameter range over which the curve
/// returns to its starting point, and a bounded sampling resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosureAnalysis {
    /// `[0, max_angle]`, where `max_angle` is the exact closure period at
    /// the chosen radius scale.
    pub domain: CurveDomain,
    /// Derived iteration count, clamped to [`ITERATION_CEILING`].
    pub iterations: u32,
    /// Present when the clamp was applied: the curve will be under-sampled
    /// relative to true closure. The domain is deliberately not shortened
    /// to match.
    pub approximation: Option<ClosureApproximation>,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(radius: f64) -> u64 {
    (radius * RADIUS_SCALE).round() as u64
}

/// Derives the closure domain and sampling resolution for a trochoid with
/// fixed-circle radius `big_radius` and rolling-circle radius
/// `small_radius`. Both are validated strictly positive by the caller.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn analyze_closure(big_radius: f64, small_radius: f64) -> ClosureAnalysis {
    let multiple = lcm(scaled(big_radius), scaled(small_radius));
    #[allow(clippy::cast_precision_loss)]
    let max_angle = TAU * (multiple as f64 / (round_to(big_radius, 6) * RADIUS_SCALE));

    let derived = (max_angle * SAMPLES_PER_RADIAN).floor() as u64;
    if derived > u64::from(ITERATION_CEILING) {
        ClosureAnalysis {
            domain: CurveDomain::new(0.0, max_angle),
            iterations: ITERATION_CEILING,
            approximation: Some(ClosureApproximation {
                derived,
                ceiling: ITERATION_CEILING,
            }),
        }
    } else {
        ClosureAnalysis {
            domain: CurveDomain::new(0.0, max_angle),
            iterations: derived as u32,
            approximation: None,
        }
    }
}
