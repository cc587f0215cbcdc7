use crate::error::{ClosureApproximation, Result, ValidationError};
use crate::fragment::{decimal, round_to, COEFF_DECIMALS};

use super::closure::analyze_closure;
use super::{check_range, AxesSynthesis, AxisEquations};

/// Whether the rolling circle rolls inside or outside the fixed circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrochoidKind {
    /// Traced inside the fixed circle.
    #[default]
    Hypo,
    /// Traced outside the fixed circle.
    Epi,
}

/// Configuration for one spirograph-type synthesis request.
///
/// The parameter domain is not user-supplied; it is derived by closure
/// analysis so the curve closes exactly (up to the iteration ceiling).
#[derive(Debug, Clone, PartialEq)]
pub struct TrochoidSpec {
    pub kind: TrochoidKind,
    /// Fixed-circle radius.
    pub big_radius: f64,
    /// Rolling-circle radius.
    pub small_radius: f64,
    /// Pen distance from the rolling circle's center.
    pub pen_distance: f64,
    /// Z-depth scaling coefficient; depth follows radial distance.
    pub dip: f64,
    pub use_cubic: bool,
}

impl Default for TrochoidSpec {
    fn default() -> Self {
        Self {
            kind: TrochoidKind::Hypo,
            big_radius: 0.25,
            small_radius: 0.18,
            pen_distance: 0.05,
            dip: 0.0,
            use_cubic: true,
        }
    }
}

impl TrochoidSpec {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("big_radius", self.big_radius, 0.001, 100.0)?;
        check_range("small_radius", self.small_radius, 0.0001, 100.0)?;
        check_range("pen_distance", self.pen_distance, 0.0, 100.0)?;
        check_range("dip", self.dip, -100.0, 100.0)?;
        Ok(())
    }
}

/// Finished trochoid synthesis: three axis equations over the closure
/// domain, plus the closure analyzer's clamp warning when one applies.
#[derive(Debug, Clone)]
pub struct TrochoidSynthesis {
    /// The three-axis synthesis over `[0, max_angle]`.
    pub axes: AxesSynthesis,
    /// Set when the derived iteration count was clamped to the ceiling.
    pub approximation: Option<ClosureApproximation>,
}

/// Synthesizes a hypotrochoid or epicycloid from a [`TrochoidSpec`].
pub struct SynthesizeTrochoid {
    spec: TrochoidSpec,
}

impl SynthesizeTrochoid {
    /// Creates a new `SynthesizeTrochoid` operation.
    #[must_use]
    pub fn new(spec: TrochoidSpec) -> Self {
        Self { spec }
    }

    /// Validates the spec, runs closure analysis, and builds the three
    /// axis equations.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any field violates its declared
    /// range, before any fragment is built.
    pub fn execute(&self) -> Result<TrochoidSynthesis> {
        self.spec.validate()?;
        let big = round_to(self.spec.big_radius, 6);
        let small = round_to(self.spec.small_radius, 6);
        let pen = round_to(self.spec.pen_distance, 6);

        let closure = analyze_closure(self.spec.big_radius, self.spec.small_radius);

        let (x, y) = match self.spec.kind {
            TrochoidKind::Hypo => {
                let difference = round_to(big - small, 6);
                let ratio = round_to(difference / small, 6);
                (
                    format!(
                        "{}*cos(t)+{}*cos({}*t)",
                        decimal(difference, COEFF_DECIMALS),
                        decimal(pen, COEFF_DECIMALS),
                        decimal(ratio, COEFF_DECIMALS),
                    ),
                    format!(
                        "{}*sin(t)-{}*sin({}*t)",
                        decimal(difference, COEFF_DECIMALS),
                        decimal(pen, COEFF_DECIMALS),
                        decimal(ratio, COEFF_DECIMALS),
                    ),
                )
            }
            TrochoidKind::Epi => {
                let sum = round_to(big + small, 6);
                let ratio = round_to(sum / small, 6);
                (
                    format!(
                        "{}*cos(t)-{}*cos({}*t)",
                        decimal(sum, COEFF_DECIMALS),
                        decimal(pen, COEFF_DECIMALS),
                        decimal(ratio, COEFF_DECIMALS),
                    ),
                    format!(
                        "{}*sin(t)-{}*sin({}*t)",
                        decimal(sum, COEFF_DECIMALS),
                        decimal(pen, COEFF_DECIMALS),
                        decimal(ratio, COEFF_DECIMALS),
                    ),
                )
            }
        };
        // Depth modulated by radial distance from the center.
        let z = format!(
            "({}*(sqrt((({x})**2)+(({y})**2))))",
            decimal(self.spec.dip, COEFF_DECIMALS),
        );

        Ok(TrochoidSynthesis {
            axes: AxesSynthesis {
                equations: AxisEquations { x, y, z },
                domain: closure.domain,
                iterations: closure.iterations,
                use_cubic: self.spec.use_cubic,
            },
            approximation: closure.approximation,
        })
    }
}
