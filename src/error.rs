use thiserror::Error;

/// Top-level error type for the camcurve equation engine.
#[derive(Debug, Error)]
pub enum CamCurveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Expr(#[from] ExprError),
}

/// A curve specification field violates its declared range or a structural
/// precondition. Raised before any equation fragment is built.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("empty parameter domain: min_t = {min_t} must be less than max_t = {max_t}")]
    EmptyDomain { min_t: f64, max_t: f64 },

    #[error("parameter {parameter} = {value} is not finite")]
    NonFinite { parameter: &'static str, value: f64 },
}

/// Fragment composition succeeded but evaluation failed at some sample.
///
/// The whole curve-build attempt for that repetition is abandoned; no
/// partial point sequence is emitted. Evaluation is deterministic, so the
/// failure is never retried.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("evaluation of `{expression}` failed at t = {parameter}: {source}")]
    Evaluation {
        expression: String,
        parameter: f64,
        source: ExprError,
    },
}

/// Errors reported by an expression evaluator.
///
/// The evaluator contract requires an explicit error, never a silent NaN,
/// on malformed syntax, unknown identifiers, or math domain errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("parse error at offset {offset} in `{expression}`: {message}")]
    Parse {
        expression: String,
        offset: usize,
        message: String,
    },

    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("math domain error: {0}")]
    Domain(String),
}

/// Non-fatal warning: the closure analyzer's derived iteration count was
/// clamped to the hard ceiling, so the sampled curve may stop short of
/// exact geometric closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sampling resolution clamped to {ceiling} iterations (closure wanted {derived}); curve may not close exactly")]
pub struct ClosureApproximation {
    /// Iteration count derived from the closure period before clamping.
    pub derived: u64,
    /// The hard iteration ceiling that was applied.
    pub ceiling: u32,
}

/// Convenience type alias for results using [`CamCurveError`].
pub type Result<T> = std::result::Result<T, CamCurveError>;
