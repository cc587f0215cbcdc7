use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::curve::{BoundAxis, CurveDomain, CurveMaterializer, DisplacementAxis, WavePointFn};
use crate::error::{Result, ValidationError};
use crate::expr::Evaluator;
use crate::fragment::{decimal, sine_fragment, triangle_fragment, COEFF_DECIMALS};

use super::{check_count, check_domain, check_range};

/// Fourier term bound used for the wave family's triangle equations.
const TRIANGLE_TERMS: u32 = 80;

/// Wave shape for the periodic wave family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveKind {
    /// Plain sine wave.
    #[default]
    Sine,
    /// Triangle wave built from a truncated Fourier series.
    Triangle,
    /// Full-wave rectified sine.
    Cycloid,
    /// Negated full-wave rectified sine.
    InvCycloid,
}

/// Configuration for one periodic wave synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSpec {
    pub kind: WaveKind,
    pub axis: DisplacementAxis,
    pub amplitude: f64,
    pub period: f64,
    /// Added to `period` for a second summed wave; 0 disables the beat.
    pub beat_period: f64,
    pub phase_shift: f64,
    pub dc_offset: f64,
    pub min_t: f64,
    pub max_t: f64,
    pub iterations: u32,
    pub use_cubic: bool,
    /// Number of parallel waves to emit.
    pub repetitions: u32,
    /// Distance between consecutive waves along the offset axis.
    pub spacing: f64,
    /// Angular phase offset between consecutive waves.
    pub repetition_angle_offset: f64,
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self {
            kind: WaveKind::Sine,
            axis: DisplacementAxis::ZX,
            amplitude: 0.01,
            period: 0.5,
            beat_period: 0.0,
            phase_shift: 0.0,
            dc_offset: 0.0,
            min_t: 0.0,
            max_t: 0.5,
            iterations: 100,
            use_cubic: true,
            repetitions: 1,
            spacing: 0.0,
            repetition_angle_offset: FRAC_PI_2,
        }
    }
}

impl WaveSpec {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        check_range("amplitude", self.amplitude, 0.0, 10.0)?;
        check_range("period", self.period, 0.001, 100.0)?;
        check_range("beat_period", self.beat_period, 0.0, 100.0)?;
        check_range("phase_shift", self.phase_shift, -360.0, 360.0)?;
        check_range("dc_offset", self.dc_offset, -1.0, 1.0)?;
        check_range("min_t", self.min_t, -3.0, 3.0)?;
        check_range("max_t", self.max_t, -3.0, 3.0)?;
        check_domain(self.min_t, self.max_t)?;
        check_count("iterations", self.iterations, 50, 2000)?;
        check_range("spacing", self.spacing, 0.0, 100.0)?;
        check_range(
            "repetition_angle_offset",
            self.repetition_angle_offset,
            -200.0 * PI,
            200.0 * PI,
        )?;
        check_count("repetitions", self.repetitions, 1, 2000)?;
        Ok(())
    }

    fn equation(&self) -> String {
        match self.kind {
            WaveKind::Sine => {
                let mut eq =
                    sine_fragment(self.amplitude, self.period, self.dc_offset, self.phase_shift);
                if self.beat_period > 0.0 {
                    eq.push('+');
                    eq.push_str(&sine_fragment(
                        self.amplitude,
                        self.period + self.beat_period,
                        self.dc_offset,
                        self.phase_shift,
                    ));
                }
                eq
            }
            WaveKind::Triangle => {
                let mut eq = format!(
                    "{}+({})",
                    decimal(self.dc_offset, COEFF_DECIMALS),
                    triangle_fragment(TRIANGLE_TERMS, self.period, self.amplitude),
                );
                if self.beat_period > 0.0 {
                    eq.push('+');
                    eq.push_str(&triangle_fragment(
                        TRIANGLE_TERMS,
                        self.period + self.beat_period,
                        self.amplitude,
                    ));
                }
                eq
            }
            WaveKind::Cycloid => format!(
                "abs({})",
                sine_fragment(self.amplitude, self.period, self.dc_offset, self.phase_shift),
            ),
            WaveKind::InvCycloid => format!(
                "-1*abs({})",
                sine_fragment(self.amplitude, self.period, self.dc_offset, self.phase_shift),
            ),
        }
    }
}

/// One wave repetition: positional and angular offsets relative to the
/// first curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveInstance {
    /// Displacement along the offset axis.
    pub offset: f64,
    /// Phase offset added to the equation's argument.
    pub angle_offset: f64,
}

/// Finished periodic wave synthesis: one scalar equation, the axis it
/// displaces, and one instance per requested repetition.
#[derive(Debug, Clone)]
pub struct WaveSynthesis {
    /// The scalar equation in `t`.
    pub equation: String,
    /// Axis remapping rule.
    pub axis: DisplacementAxis,
    /// Parameter domain to sample over.
    pub domain: CurveDomain,
    /// Sampling resolution.
    pub iterations: u32,
    /// Interpolation mode handed to the curve materializer.
    pub use_cubic: bool,
    /// Per-repetition offsets, in emission order.
    pub instances: Vec<WaveInstance>,
}

impl WaveSynthesis {
    /// Compiles the equation into a point function for one instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the equation fails to compile.
    pub fn bind<V: Evaluator>(
        &self,
        evaluator: &V,
        instance: WaveInstance,
    ) -> Result<WavePointFn<V::Compiled>> {
        let equation = BoundAxis::bind(evaluator, &self.equation)?;
        Ok(WavePointFn::new(
            equation,
            self.axis,
            instance.offset,
            instance.angle_offset,
            self.domain,
        ))
    }

    /// Builds every repetition through the materializer collaborator, in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if compilation, evaluation, or construction fails;
    /// the failing repetition emits no curve.
    pub fn materialize<V, M>(&self, evaluator: &V, materializer: &mut M) -> Result<Vec<M::Handle>>
    where
        V: Evaluator,
        M: CurveMaterializer,
    {
        let mut handles = Vec::with_capacity(self.instances.len());
        for instance in &self.instances {
            let point_fn = self.bind(evaluator, *instance)?;
            // The point function already carries the repetition offset, so
            // the materializer must not translate the curve again.
            handles.push(materializer.build_curve(
                &point_fn,
                self.iterations,
                0.0,
                self.use_cubic,
            )?);
        }
        Ok(handles)
    }
}

/// Synthesizes a periodic wave curve family from a [`WaveSpec`].
pub struct SynthesizeWave {
    spec: WaveSpec,
}

impl SynthesizeWave {
    /// Creates a new `SynthesizeWave` operation.
    #[must_use]
    pub fn new(spec: WaveSpec) -> Self {
        Self { spec }
    }

    /// Validates the spec and builds the wave equation and its repetition
    /// instances.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any field violates its declared
    /// range, before any fragment is built.
    pub fn execute(&self) -> Result<WaveSynthesis> {
        self.spec.validate()?;
        let equation = self.spec.equation();
        let instances = (0..self.spec.repetitions)
            .map(|i| WaveInstance {
                offset: self.spec.spacing * f64::from(i),
                angle_offset: self.spec.repetition_angle_offset * self.spec.period * f64::from(i)
                    / TAU,
            })
            .collect();
        Ok(WaveSynthesis {
            equation,
            axis: self.spec.axis,
            domain: CurveDomain::new(self.spec.min_t, self.spec.max_t),
            iterations: self.spec.iterations,
            use_cubic: self.spec.use_cubic,
            instances,
        })
    }
}
