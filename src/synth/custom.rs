use crate::curve::CurveDomain;
use crate::error::{Result, ValidationError};

use super::{check_count, check_domain, check_range, AxesSynthesis, AxisEquations};

/// Configuration for a custom curve: three user-authored expressions in
/// `t`, one per axis. No equation synthesis happens here; the family's
/// responsibility is purely structural.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomSpec {
    pub x_equation: String,
    pub y_equation: String,
    pub z_equation: String,
    pub min_t: f64,
    pub max_t: f64,
    pub iterations: u32,
    pub use_cubic: bool,
}

impl Default for CustomSpec {
    fn default() -> Self {
        Self {
            x_equation: "t".to_owned(),
            y_equation: "0".to_owned(),
            z_equation: "0.05*sin(2*pi*4*t)".to_owned(),
            min_t: 0.0,
            max_t: 0.5,
            iterations: 100,
            use_cubic: true,
        }
    }
}

impl CustomSpec {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("min_t", self.min_t, -3.0, 3.0)?;
        check_range("max_t", self.max_t, -3.0, 10.0)?;
        check_domain(self.min_t, self.max_t)?;
        check_count("iterations", self.iterations, 50, 2000)?;
        Ok(())
    }
}

/// Wraps user-authored axis expressions into a synthesis result. The
/// expressions themselves are checked by the evaluator at bind time.
pub struct SynthesizeCustom {
    spec: CustomSpec,
}

impl SynthesizeCustom {
    /// Creates a new `SynthesizeCustom` operation.
    #[must_use]
    pub fn new(spec: CustomSpec) -> Self {
        Self { spec }
    }

    /// Validates the domain and resolution and passes the expressions
    /// through.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the domain or iteration count
    /// violates its declared range.
    pub fn execute(&self) -> Result<AxesSynthesis> {
        self.spec.validate()?;
        Ok(AxesSynthesis {
            equations: AxisEquations {
                x: self.spec.x_equation.clone(),
                y: self.spec.y_equation.clone(),
                z: self.spec.z_equation.clone(),
            },
            domain: CurveDomain::new(self.spec.min_t, self.spec.max_t),
            iterations: self.spec.iterations,
            use_cubic: self.spec.use_cubic,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::{ParametricCurve, PolylineMaterializer};
    use crate::error::CamCurveError;
    use crate::expr::ExprEvaluator;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn expressions_pass_through_verbatim() {
        let synthesis = SynthesizeCustom::new(CustomSpec::default())
            .execute()
            .unwrap();
        assert_eq!(synthesis.equations.x, "t");
        assert_eq!(synthesis.equations.y, "0");
        assert_eq!(synthesis.equations.z, "0.05*sin(2*pi*4*t)");
    }

    #[test]
    fn default_curve_evaluates() {
        let synthesis = SynthesizeCustom::new(CustomSpec::default())
            .execute()
            .unwrap();
        let point_fn = synthesis.bind(&ExprEvaluator).unwrap();
        let p = point_fn.point_at(0.25).unwrap();
        assert_relative_eq!(p.x, 0.25);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, 0.05 * (2.0 * PI).sin(), epsilon = 1e-9);
    }

    #[test]
    fn malformed_expression_fails_at_bind() {
        let spec = CustomSpec {
            z_equation: "0.05*sin(".to_owned(),
            ..CustomSpec::default()
        };
        let synthesis = SynthesizeCustom::new(spec).execute().unwrap();
        let err = synthesis.bind(&ExprEvaluator).unwrap_err();
        assert!(matches!(err, CamCurveError::Expr(_)));
    }

    #[test]
    fn evaluation_failure_abandons_the_whole_curve() {
        let spec = CustomSpec {
            y_equation: "1/(t-0.25)".to_owned(),
            ..CustomSpec::default()
        };
        let synthesis = SynthesizeCustom::new(spec).execute().unwrap();
        let mut materializer = PolylineMaterializer;
        let err = synthesis
            .materialize(&ExprEvaluator, &mut materializer)
            .unwrap_err();
        match err {
            CamCurveError::Synthesis(crate::error::SynthesisError::Evaluation {
                expression,
                parameter,
                ..
            }) => {
                assert_eq!(expression, "1/(t-0.25)");
                assert_relative_eq!(parameter, 0.25);
            }
            other => panic!("expected evaluation error, got {other}"),
        }
    }

    #[test]
    fn low_iteration_count_is_rejected() {
        let spec = CustomSpec {
            iterations: 10,
            ..CustomSpec::default()
        };
        assert!(SynthesizeCustom::new(spec).execute().is_err());
    }
}
