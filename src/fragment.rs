//! Equation fragment builders.
//!
//! A fragment is an immutable, well-formed scalar expression string in the
//! curve parameter `t`. Fragments are composed from rounded numeric literals
//! (6 decimal digits for coefficients and offsets, 8 for Fourier
//! coefficients) so that re-synthesis from an identical specification yields
//! byte-identical strings.

use std::f64::consts::PI;

/// Decimal digits kept for coefficients, offsets, and periods.
pub(crate) const COEFF_DECIMALS: i32 = 6;

/// Decimal digits kept for Fourier series coefficients.
const FOURIER_DECIMALS: i32 = 8;

/// Rounds `value` to `digits` decimal places.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10_f64.powi(digits);
    (value * scale).round() / scale
}

/// Formats `value` rounded to `digits` decimals, with trailing zeros (and a
/// trailing decimal point) trimmed. `-0` normalizes to `0`.
pub(crate) fn decimal(value: f64, digits: i32) -> String {
    let rounded = round_to(value, digits);
    let precision = usize::try_from(digits).unwrap_or(0);
    let formatted = format!("{rounded:.precision$}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Builds the fragment `dc_offset + amplitude*sin((2*pi/period)*(t+phase_shift))`.
///
/// All numeric literals are rounded to 6 decimals before composition.
/// Pure and deterministic; callers validate `period != 0`.
#[must_use]
pub fn sine_fragment(amplitude: f64, period: f64, dc_offset: f64, phase_shift: f64) -> String {
    format!(
        "{}+{}*sin((2*pi/{})*(t+{}))",
        decimal(dc_offset, COEFF_DECIMALS),
        decimal(amplitude, COEFF_DECIMALS),
        decimal(period, COEFF_DECIMALS),
        decimal(phase_shift, COEFF_DECIMALS),
    )
}

/// Builds a truncated Fourier series for a triangle wave of the given
/// `period` and `amplitude`.
///
/// Harmonics are the odd `n` in `1..term_count`; each term is
/// `(-1)^((n-1)/2)/n^2 * sin(n*pi/(period/2)*t)` and the sum is scaled by
/// `8*amplitude/pi^2`. Coefficients are rounded to 8 decimals.
///
/// Pure and deterministic; callers validate `period != 0` and
/// `term_count >= 1`.
#[must_use]
pub fn triangle_fragment(term_count: u32, period: f64, amplitude: f64) -> String {
    let mut series = format!("{}*(", decimal(8.0 * amplitude / (PI * PI), FOURIER_DECIMALS));
    for n in (1..term_count).step_by(2) {
        let alternation = (n - 1) / 2;
        let sign = if alternation % 2 == 0 { 1.0 } else { -1.0 };
        let coefficient = sign / (f64::from(n) * f64::from(n));
        let angular = f64::from(n) * PI / (period / 2.0);
        if n > 1 {
            series.push('+');
        }
        series.push_str(&format!(
            "{}*sin({}*t)",
            decimal(coefficient, FOURIER_DECIMALS),
            decimal(angular, FOURIER_DECIMALS),
        ));
    }
    series.push(')');
    series
}
