use crate::curve::CurveDomain;
use crate::error::{Result, ValidationError};
use crate::fragment::{sine_fragment, triangle_fragment};

use super::{check_count, check_domain, check_range, AxesSynthesis, AxisEquations};

/// Fourier term bound used for the Lissajous family's triangle equations.
const TRIANGLE_TERMS: u32 = 100;

/// Wave shape available per Lissajous axis (the Z axis is sine-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LissajousWaveKind {
    #[default]
    Sine,
    Triangle,
}

/// Configuration for one Lissajous figure synthesis request.
///
/// X and Y carry independent `(kind, amplitude, period)` triples; Z is a
/// plain sine. The phase shift applies to the X axis only.
#[derive(Debug, Clone, PartialEq)]
pub struct LissajousSpec {
    pub x_kind: LissajousWaveKind,
    pub x_amplitude: f64,
    pub x_period: f64,
    pub y_kind: LissajousWaveKind,
    pub y_amplitude: f64,
    pub y_period: f64,
    pub z_amplitude: f64,
    pub z_period: f64,
    pub phase_shift: f64,
    pub min_t: f64,
    pub max_t: f64,
    pub iterations: u32,
    pub use_cubic: bool,
}

impl Default for LissajousSpec {
    fn default() -> Self {
        Self {
            x_kind: LissajousWaveKind::Sine,
            x_amplitude: 0.1,
            x_period: 1.1,
            y_kind: LissajousWaveKind::Sine,
            y_amplitude: 0.1,
            y_period: 1.0,
            z_amplitude: 0.0,
            z_period: 1.0,
            phase_shift: 0.0,
            min_t: 0.0,
            max_t: 11.0,
            iterations: 500,
            use_cubic: true,
        }
    }
}

impl LissajousSpec {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("x_amplitude", self.x_amplitude, 0.0, 100.0)?;
        check_range("x_period", self.x_period, 0.001, 100.0)?;
        check_range("y_amplitude", self.y_amplitude, 0.0, 100.0)?;
        check_range("y_period", self.y_period, 0.001, 100.0)?;
        check_range("z_amplitude", self.z_amplitude, 0.0, 100.0)?;
        check_range("z_period", self.z_period, 0.001, 100.0)?;
        check_range("phase_shift", self.phase_shift, -360.0, 360.0)?;
        check_range("min_t", self.min_t, -10.0, 3.0)?;
        check_range("max_t", self.max_t, -3.0, 1_000_000.0)?;
        check_domain(self.min_t, self.max_t)?;
        check_count("iterations", self.iterations, 50, 10_000)?;
        Ok(())
    }
}

/// Synthesizes a Lissajous figure from a [`LissajousSpec`].
pub struct SynthesizeLissajous {
    spec: LissajousSpec,
}

impl SynthesizeLissajous {
    /// Creates a new `SynthesizeLissajous` operation.
    #[must_use]
    pub fn new(spec: LissajousSpec) -> Self {
        Self { spec }
    }

    /// Validates the spec and builds the three axis equations.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any field violates its declared
    /// range, before any fragment is built.
    pub fn execute(&self) -> Result<AxesSynthesis> {
        self.spec.validate()?;
        let spec = &self.spec;
        let x = match spec.x_kind {
            LissajousWaveKind::Sine => {
                sine_fragment(spec.x_amplitude, spec.x_period, 0.0, spec.phase_shift)
            }
            LissajousWaveKind::Triangle => {
                triangle_fragment(TRIANGLE_TERMS, spec.x_period, spec.x_amplitude)
            }
        };
        let y = match spec.y_kind {
            LissajousWaveKind::Sine => sine_fragment(spec.y_amplitude, spec.y_period, 0.0, 0.0),
            LissajousWaveKind::Triangle => {
                triangle_fragment(TRIANGLE_TERMS, spec.y_period, spec.y_amplitude)
            }
        };
        let z = sine_fragment(spec.z_amplitude, spec.z_period, 0.0, 0.0);
        Ok(AxesSynthesis {
            equations: AxisEquations { x, y, z },
            domain: CurveDomain::new(spec.min_t, spec.max_t),
            iterations: spec.iterations,
            use_cubic: spec.use_cubic,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::ParametricCurve;
    use crate::expr::ExprEvaluator;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    #[test]
    fn default_axes_are_sines() {
        let synthesis = SynthesizeLissajous::new(LissajousSpec::default())
            .execute()
            .unwrap();
        assert_eq!(synthesis.equations.x, "0+0.1*sin((2*pi/1.1)*(t+0))");
        assert_eq!(synthesis.equations.y, "0+0.1*sin((2*pi/1)*(t+0))");
        assert_eq!(synthesis.equations.z, "0+0*sin((2*pi/1)*(t+0))");
    }

    #[test]
    fn phase_shift_applies_to_x_only() {
        let spec = LissajousSpec {
            phase_shift: 0.3,
            ..LissajousSpec::default()
        };
        let synthesis = SynthesizeLissajous::new(spec).execute().unwrap();
        assert!(synthesis.equations.x.contains("(t+0.3)"));
        assert!(synthesis.equations.y.contains("(t+0)"));
        assert!(synthesis.equations.z.contains("(t+0)"));
    }

    #[test]
    fn triangle_axes_use_one_hundred_terms() {
        let spec = LissajousSpec {
            x_kind: LissajousWaveKind::Triangle,
            ..LissajousSpec::default()
        };
        let synthesis = SynthesizeLissajous::new(spec).execute().unwrap();
        // Odd harmonics strictly below 100: 50 terms.
        assert_eq!(synthesis.equations.x.matches("sin").count(), 50);
    }

    #[test]
    fn point_function_matches_closed_form() {
        let spec = LissajousSpec {
            x_amplitude: 0.2,
            x_period: 2.0,
            y_amplitude: 0.3,
            y_period: 3.0,
            z_amplitude: 0.1,
            z_period: 1.5,
            ..LissajousSpec::default()
        };
        let synthesis = SynthesizeLissajous::new(spec).execute().unwrap();
        let point_fn = synthesis.bind(&ExprEvaluator).unwrap();
        let t = 0.7;
        let p = point_fn.point_at(t).unwrap();
        assert_relative_eq!(p.x, 0.2 * (TAU / 2.0 * t).sin(), epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.3 * (TAU / 3.0 * t).sin(), epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.1 * (TAU / 1.5 * t).sin(), epsilon = 1e-6);
    }

    #[test]
    fn zero_period_is_rejected() {
        let spec = LissajousSpec {
            y_period: 0.0,
            ..LissajousSpec::default()
        };
        assert!(SynthesizeLissajous::new(spec).execute().is_err());
    }

    #[test]
    fn iterations_above_family_limit_are_rejected() {
        let spec = LissajousSpec {
            iterations: 10_001,
            ..LissajousSpec::default()
        };
        assert!(SynthesizeLissajous::new(spec).execute().is_err());
    }
}
