//! Curve family synthesizers.
//!
//! Each synthesizer turns a validated parameter set into finished equation
//! strings (one per spatial axis, or a single remapped scalar for the wave
//! family) plus a parameter domain and sampling resolution. Validation
//! happens before any fragment is built; out-of-range fields are reported,
//! never silently clamped.

mod closure;
mod custom;
mod lissajous;
mod trochoid;
mod wave;

pub use closure::{analyze_closure, ClosureAnalysis, ITERATION_CEILING};
pub use custom::{CustomSpec, SynthesizeCustom};
pub use lissajous::{LissajousSpec, LissajousWaveKind, SynthesizeLissajous};
pub use trochoid::{SynthesizeTrochoid, TrochoidKind, TrochoidSpec, TrochoidSynthesis};
pub use wave::{SynthesizeWave, WaveInstance, WaveKind, WaveSpec, WaveSynthesis};

use crate::curve::{AxesPointFn, CurveDomain, CurveMaterializer};
use crate::error::{Result, ValidationError};
use crate::expr::Evaluator;

/// One finished equation string per spatial axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisEquations {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// Finished synthesis for the identity-composed families (Lissajous,
/// trochoid, custom): three axis equations over a shared domain.
#[derive(Debug, Clone)]
pub struct AxesSynthesis {
    /// The per-axis equation strings.
    pub equations: AxisEquations,
    /// Parameter domain to sample over.
    pub domain: CurveDomain,
    /// Sampling resolution.
    pub iterations: u32,
    /// Interpolation mode handed to the curve materializer.
    pub use_cubic: bool,
}

impl AxesSynthesis {
    /// Compiles the three axis equations into a point function.
    ///
    /// # Errors
    ///
    /// Returns an error if any equation fails to compile.
    pub fn bind<V: Evaluator>(&self, evaluator: &V) -> Result<AxesPointFn<V::Compiled>> {
        AxesPointFn::bind(
            evaluator,
            &self.equations.x,
            &self.equations.y,
            &self.equations.z,
            self.domain,
        )
    }

    /// Builds the curve through the materializer collaborator.
    ///
    /// # Errors
    ///
    /// Returns an error if compilation, evaluation, or construction fails.
    pub fn materialize<V, M>(&self, evaluator: &V, materializer: &mut M) -> Result<M::Handle>
    where
        V: Evaluator,
        M: CurveMaterializer,
    {
        let point_fn = self.bind(evaluator)?;
        materializer.build_curve(&point_fn, self.iterations, 0.0, self.use_cubic)
    }
}

/// Checks a real-valued field against its declared range.
pub(crate) fn check_range(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> std::result::Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { parameter, value });
    }
    if value < min || value > max {
        return Err(ValidationError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Checks an integer-valued field against its declared range.
pub(crate) fn check_count(
    parameter: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> std::result::Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::ParameterOutOfRange {
            parameter,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(max),
        });
    }
    Ok(())
}

/// Checks the structural precondition `min_t < max_t`.
pub(crate) fn check_domain(min_t: f64, max_t: f64) -> std::result::Result<(), ValidationError> {
    if min_t < max_t {
        Ok(())
    } else {
        Err(ValidationError::EmptyDomain { min_t, max_t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_range_accepts_bounds() {
        assert!(check_range("amplitude", 0.0, 0.0, 10.0).is_ok());
        assert!(check_range("amplitude", 10.0, 0.0, 10.0).is_ok());
    }

    #[test]
    fn check_range_rejects_outside() {
        assert!(check_range("amplitude", -0.1, 0.0, 10.0).is_err());
        assert!(check_range("amplitude", 10.1, 0.0, 10.0).is_err());
    }

    #[test]
    fn check_range_rejects_non_finite() {
        assert!(check_range("period", f64::NAN, 0.001, 100.0).is_err());
        assert!(check_range("period", f64::INFINITY, 0.001, 100.0).is_err());
    }

    #[test]
    fn check_domain_requires_strict_order() {
        assert!(check_domain(0.0, 0.5).is_ok());
        assert!(check_domain(0.5, 0.5).is_err());
        assert!(check_domain(1.0, 0.5).is_err());
    }
}
