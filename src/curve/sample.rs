use crate::error::Result;
use crate::math::Point3;

use super::ParametricCurve;

/// A polyline approximation of a curve: the ordered point sequence consumed
/// by the host's curve construction facility.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

/// Samples `curve` at `iterations + 1` evenly spaced parameters over its
/// domain, inclusive of both ends.
///
/// # Errors
///
/// Returns an error on the first failed evaluation; no partial point
/// sequence is emitted.
pub fn sample<C: ParametricCurve + ?Sized>(curve: &C, iterations: u32) -> Result<Polyline> {
    let domain = curve.domain();
    let span = domain.span();
    let mut points = Vec::with_capacity(usize::try_from(iterations).unwrap_or(0) + 1);
    for i in 0..=iterations {
        let t = domain.t_min + span * f64::from(i) / f64::from(iterations.max(1));
        points.push(curve.point_at(t)?);
    }
    Ok(Polyline { points })
}

/// Curve-construction collaborator: consumes a point function and
/// materializes a curve object in the host scene. Invoked once per
/// requested repetition.
pub trait CurveMaterializer {
    /// Handle to the materialized curve.
    type Handle;

    /// Builds one curve from `curve` at the given sampling resolution.
    ///
    /// `offset` is an additional translation for hosts that position
    /// curves themselves. The synthesizers always pass 0 here: their point
    /// functions already carry any repetition offset.
    ///
    /// # Errors
    ///
    /// Returns an error if sampling or construction fails.
    fn build_curve(
        &mut self,
        curve: &dyn ParametricCurve,
        iterations: u32,
        offset: f64,
        use_cubic: bool,
    ) -> Result<Self::Handle>;
}

/// Materializer that samples curves into [`Polyline`]s. Stands in for a
/// host geometry kernel that builds splines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolylineMaterializer;

impl CurveMaterializer for PolylineMaterializer {
    type Handle = Polyline;

    fn build_curve(
        &mut self,
        curve: &dyn ParametricCurve,
        iterations: u32,
        _offset: f64,
        _use_cubic: bool,
    ) -> Result<Polyline> {
        sample(curve, iterations)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::{BoundAxis, CurveDomain, DisplacementAxis, WavePointFn};
    use crate::expr::ExprEvaluator;
    use approx::assert_relative_eq;

    fn line_curve() -> WavePointFn<crate::expr::CompiledExpr> {
        let equation = BoundAxis::bind(&ExprEvaluator, "2*t").unwrap();
        WavePointFn::new(
            equation,
            DisplacementAxis::ZX,
            0.0,
            0.0,
            CurveDomain::new(0.0, 1.0),
        )
    }

    #[test]
    fn sample_is_inclusive_of_both_ends() {
        let polyline = sample(&line_curve(), 4).unwrap();
        assert_eq!(polyline.points.len(), 5);
        assert_relative_eq!(polyline.points[0].x, 0.0);
        assert_relative_eq!(polyline.points[4].x, 1.0);
        assert_relative_eq!(polyline.points[4].z, 2.0);
    }

    #[test]
    fn sample_spacing_is_uniform() {
        let polyline = sample(&line_curve(), 10).unwrap();
        for pair in polyline.points.windows(2) {
            assert_relative_eq!(pair[1].x - pair[0].x, 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn failed_evaluation_yields_no_partial_sequence() {
        let equation = BoundAxis::bind(&ExprEvaluator, "1/(t-0.5)").unwrap();
        let curve = WavePointFn::new(
            equation,
            DisplacementAxis::ZX,
            0.0,
            0.0,
            CurveDomain::new(0.0, 1.0),
        );
        // t = 0.5 is hit exactly with an even iteration count.
        assert!(sample(&curve, 4).is_err());
    }
}
