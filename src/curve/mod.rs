mod point_fn;
mod sample;

pub use point_fn::{AxesPointFn, BoundAxis, DisplacementAxis, WavePointFn, CURVE_VARIABLE};
pub use sample::{sample, CurveMaterializer, Polyline, PolylineMaterializer};

use crate::error::Result;
use crate::math::Point3;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns the length of the parameter range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }
}

/// Trait for parametric point functions in 3D space.
pub trait ParametricCurve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if expression evaluation fails at `t`.
    fn point_at(&self, t: f64) -> Result<Point3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;
}
