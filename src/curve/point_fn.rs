use crate::error::{Result, SynthesisError};
use crate::expr::{Evaluable, Evaluator};
use crate::math::Point3;

use super::{CurveDomain, ParametricCurve};

/// The variable name every synthesized equation is expressed in.
pub const CURVE_VARIABLE: &str = "t";

/// Which coordinate is held as the free parameter and which is displaced by
/// the equation's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplacementAxis {
    /// Y runs along the parameter; X takes the equation's value.
    XY,
    /// X runs along the parameter; Y takes the equation's value.
    YX,
    /// X runs along the parameter; Z takes the equation's value.
    #[default]
    ZX,
    /// Y runs along the parameter; Z takes the equation's value.
    ZY,
}

impl DisplacementAxis {
    /// Maps the parameter and the equation's value onto 3D space, with the
    /// repetition `offset` applied along the remaining axis.
    #[must_use]
    pub fn map(self, t: f64, displaced: f64, offset: f64) -> Point3 {
        match self {
            Self::XY => Point3::new(displaced + offset, t, 0.0),
            Self::YX => Point3::new(t, displaced + offset, 0.0),
            Self::ZX => Point3::new(t, offset, displaced),
            Self::ZY => Point3::new(offset, t, displaced),
        }
    }

    /// Index (0 = x, 1 = y, 2 = z) of the coordinate that carries the
    /// repetition offset.
    #[must_use]
    pub fn offset_axis(self) -> usize {
        match self {
            Self::XY | Self::ZY => 0,
            Self::YX | Self::ZX => 1,
        }
    }
}

/// One compiled axis expression paired with its source string, so that
/// evaluation failures carry full context.
#[derive(Debug, Clone)]
pub struct BoundAxis<E> {
    expression: String,
    compiled: E,
}

impl<E: Evaluable> BoundAxis<E> {
    /// Compiles `expression` in the curve variable through `evaluator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression fails to compile.
    pub fn bind<V>(evaluator: &V, expression: &str) -> Result<Self>
    where
        V: Evaluator<Compiled = E>,
    {
        let compiled = evaluator.compile(expression, CURVE_VARIABLE)?;
        Ok(Self {
            expression: expression.to_owned(),
            compiled,
        })
    }

    /// Returns the source expression string.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluates the axis at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns a [`SynthesisError::Evaluation`] carrying the failing
    /// expression and the parameter value.
    pub fn value_at(&self, t: f64) -> Result<f64> {
        self.compiled.evaluate(t).map_err(|source| {
            SynthesisError::Evaluation {
                expression: self.expression.clone(),
                parameter: t,
                source,
            }
            .into()
        })
    }
}

/// Point function for the periodic wave family: a single scalar equation
/// remapped onto 3D space, with per-repetition positional and angular
/// offsets.
#[derive(Debug, Clone)]
pub struct WavePointFn<E> {
    equation: BoundAxis<E>,
    axis: DisplacementAxis,
    offset: f64,
    angle_offset: f64,
    domain: CurveDomain,
}

impl<E: Evaluable> WavePointFn<E> {
    /// Creates a wave point function from a bound equation.
    #[must_use]
    pub fn new(
        equation: BoundAxis<E>,
        axis: DisplacementAxis,
        offset: f64,
        angle_offset: f64,
        domain: CurveDomain,
    ) -> Self {
        Self {
            equation,
            axis,
            offset,
            angle_offset,
            domain,
        }
    }
}

impl<E: Evaluable> ParametricCurve for WavePointFn<E> {
    fn point_at(&self, t: f64) -> Result<Point3> {
        let displaced = self.equation.value_at(t + self.angle_offset)?;
        Ok(self.axis.map(t, displaced, self.offset))
    }

    fn domain(&self) -> CurveDomain {
        self.domain
    }
}

/// Point function composed of three independent axis expressions
/// (Lissajous, trochoid, and custom families).
#[derive(Debug, Clone)]
pub struct AxesPointFn<E> {
    x: BoundAxis<E>,
    y: BoundAxis<E>,
    z: BoundAxis<E>,
    domain: CurveDomain,
}

impl<E: Evaluable> AxesPointFn<E> {
    /// Compiles the three axis expressions through `evaluator`.
    ///
    /// # Errors
    ///
    /// Returns an error if any expression fails to compile.
    pub fn bind<V>(evaluator: &V, x: &str, y: &str, z: &str, domain: CurveDomain) -> Result<Self>
    where
        V: Evaluator<Compiled = E>,
    {
        Ok(Self {
            x: BoundAxis::bind(evaluator, x)?,
            y: BoundAxis::bind(evaluator, y)?,
            z: BoundAxis::bind(evaluator, z)?,
            domain,
        })
    }
}

impl<E: Evaluable> ParametricCurve for AxesPointFn<E> {
    fn point_at(&self, t: f64) -> Result<Point3> {
        Ok(Point3::new(
            self.x.value_at(t)?,
            self.y.value_at(t)?,
            self.z.value_at(t)?,
        ))
    }

    fn domain(&self) -> CurveDomain {
        self.domain
    }
}
