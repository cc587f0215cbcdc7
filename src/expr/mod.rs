//! Expression compilation and evaluation.
//!
//! The equation engine composes expression strings and hands them to an
//! evaluator collaborator; it never interprets algebra itself. The
//! collaborator seam is the [`Evaluator`]/[`Evaluable`] trait pair, so a
//! host application may substitute its own engine. [`ExprEvaluator`] is the
//! default implementation: a two-phase compile (parse to a tree, then
//! resolve identifiers) followed by checked tree-walking evaluation.

mod ast;
mod parser;

pub use ast::{Expr, Func};

use crate::error::ExprError;

/// A compiled expression, evaluable at values of its declared variable.
pub trait Evaluable {
    /// Evaluates the expression at `value`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExprError`] on math domain errors (division by zero,
    /// negative square root, non-finite result). Never silently yields NaN.
    fn evaluate(&self, value: f64) -> Result<f64, ExprError>;
}

/// Compiles expression strings against a declared variable name.
pub trait Evaluator {
    /// The compiled representation produced by this evaluator.
    type Compiled: Evaluable;

    /// Compiles `expression`, binding `variable` as its free variable.
    ///
    /// # Errors
    ///
    /// Returns an [`ExprError`] on malformed syntax, unknown identifiers,
    /// or unknown functions.
    fn compile(&self, expression: &str, variable: &str) -> Result<Self::Compiled, ExprError>;
}

/// The crate's default expression evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprEvaluator;

impl Evaluator for ExprEvaluator {
    type Compiled = CompiledExpr;

    fn compile(&self, expression: &str, variable: &str) -> Result<CompiledExpr, ExprError> {
        let raw = parser::parse(expression)?;
        let root = ast::resolve(raw, variable)?;
        Ok(CompiledExpr { root })
    }
}

/// An expression compiled by [`ExprEvaluator`].
#[derive(Debug, Clone)]
pub struct CompiledExpr {
    root: Expr,
}

impl Evaluable for CompiledExpr {
    fn evaluate(&self, value: f64) -> Result<f64, ExprError> {
        let result = ast::eval(&self.root, value)?;
        if result.is_finite() {
            Ok(result)
        } else {
            Err(ExprError::Domain(format!("non-finite result {result}")))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn eval(expression: &str, t: f64) -> Result<f64, ExprError> {
        ExprEvaluator.compile(expression, "t")?.evaluate(t)
    }

    #[test]
    fn arithmetic() {
        assert_relative_eq!(eval("1+2*3", 0.0).unwrap(), 7.0);
        assert_relative_eq!(eval("(1+2)*3", 0.0).unwrap(), 9.0);
        assert_relative_eq!(eval("10/4", 0.0).unwrap(), 2.5);
        assert_relative_eq!(eval("2**3", 0.0).unwrap(), 8.0);
        assert_relative_eq!(eval("2^0.5", 0.0).unwrap(), 2.0_f64.sqrt());
    }

    #[test]
    fn variable_substitution() {
        assert_relative_eq!(eval("3*t+1", 2.0).unwrap(), 7.0);
        assert_relative_eq!(eval("t", -1.5).unwrap(), -1.5);
    }

    #[test]
    fn pi_constant() {
        assert_relative_eq!(eval("2*pi", 0.0).unwrap(), 2.0 * PI);
    }

    #[test]
    fn functions() {
        assert_relative_eq!(eval("sin(pi/2)", 0.0).unwrap(), 1.0);
        assert_relative_eq!(eval("cos(0)", 0.0).unwrap(), 1.0);
        assert_relative_eq!(eval("abs(0-3)", 0.0).unwrap(), 3.0);
        assert_relative_eq!(eval("sqrt(9)", 0.0).unwrap(), 3.0);
    }

    #[test]
    fn custom_variable_name() {
        let compiled = ExprEvaluator.compile("u*u", "u").unwrap();
        assert_relative_eq!(compiled.evaluate(3.0).unwrap(), 9.0);
    }

    #[test]
    fn unknown_identifier_is_reported() {
        let err = ExprEvaluator.compile("x+1", "t").unwrap_err();
        assert_eq!(err, ExprError::UnknownIdentifier("x".to_owned()));
    }

    #[test]
    fn unknown_function_is_reported() {
        let err = ExprEvaluator.compile("sinh(t)", "t").unwrap_err();
        assert_eq!(err, ExprError::UnknownFunction("sinh".to_owned()));
    }

    #[test]
    fn division_by_zero_is_an_error_not_nan() {
        let err = eval("1/0", 0.0).unwrap_err();
        assert!(matches!(err, ExprError::Domain(_)));
        let err = eval("1/t", 0.0).unwrap_err();
        assert!(matches!(err, ExprError::Domain(_)));
    }

    #[test]
    fn tiny_denominator_is_not_division_by_zero() {
        let value = eval("1/t", 1e-17).unwrap();
        assert_relative_eq!(value, 1e17);
    }

    #[test]
    fn negative_sqrt_is_an_error() {
        let err = eval("sqrt(0-1)", 0.0).unwrap_err();
        assert!(matches!(err, ExprError::Domain(_)));
    }

    #[test]
    fn non_finite_power_is_an_error() {
        // (-1)^0.5 is NaN under powf; must surface as a domain error.
        let err = eval("(0-1)**0.5", 0.0).unwrap_err();
        assert!(matches!(err, ExprError::Domain(_)));
    }

    #[test]
    fn evaluates_sine_fragment_output() {
        let s = crate::fragment::sine_fragment(0.01, 0.5, 0.0, 0.0);
        let value = eval(&s, 0.125).unwrap();
        assert_relative_eq!(value, 0.01 * (2.0 * PI / 0.5 * 0.125).sin(), epsilon = 1e-6);
    }

    #[test]
    fn evaluates_triangle_fragment_output() {
        let s = crate::fragment::triangle_fragment(80, 0.5, 0.01);
        // Odd-harmonic sine series vanishes at the origin.
        assert_relative_eq!(eval(&s, 0.0).unwrap(), 0.0);
        // Peak of the triangle wave is at a quarter period.
        assert_relative_eq!(eval(&s, 0.125).unwrap(), 0.01, epsilon = 1e-4);
    }
}
