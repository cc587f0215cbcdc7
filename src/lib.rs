pub mod curve;
pub mod error;
pub mod expr;
pub mod fragment;
pub mod math;
pub mod synth;

pub use error::{CamCurveError, Result};
