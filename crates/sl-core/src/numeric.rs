use crate::SlError;

/// Floating point type used throughout system
pub type Real = f64;

/// Largest exponent handed to `exp` by [`safe_exp`].
///
/// `exp(700)` is about 1e304, which leaves head-room for the prefactors the
/// evaluators multiply in (saturation currents, reference resistances).
pub const MAX_EXPONENT: Real = 700.0;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SlError::NonFinite { what, value: v })
    }
}

/// `exp` with the exponent capped at [`MAX_EXPONENT`].
///
/// Finite for every finite input and still monotonically non-decreasing.
#[inline]
pub fn safe_exp(x: Real) -> Real {
    x.min(MAX_EXPONENT).exp()
}

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_to(v: Real, decimals: i32) -> Real {
    if !v.is_finite() || !(-300..=300).contains(&decimals) {
        return v;
    }
    let scale = 10f64.powi(decimals);
    // `+ 0.0` folds a negative zero into zero
    (v * scale).round() / scale + 0.0
}

/// Snap `v` onto the grid `min + k * step`, the way a slider with a step
/// quantizes user input. Float accumulation noise below the step's
/// resolution is dropped, so `-0.5 + 20 * 0.025` lands on exactly `0.0`.
pub fn snap_to_step(v: Real, min: Real, step: Real) -> Real {
    if step <= 0.0 || !step.is_finite() {
        return v;
    }
    let k = ((v - min) / step).round();
    round_to(min + k * step, step_decimals(step))
}

/// Decimal places that resolve `step` with nine digits to spare.
#[inline]
pub fn step_decimals(step: Real) -> i32 {
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    9 - step.abs().log10().floor() as i32
}
