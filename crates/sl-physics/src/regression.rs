//! Least-squares line fitting and band-gap recovery.

use crate::error::{PhysicsError, PhysicsResult};
use sl_core::constants::BOLTZMANN_EV_PER_K;

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over `(x, y)` pairs.
pub fn fit_line(points: &[(f64, f64)]) -> PhysicsResult<LinearFit> {
    if points.len() < 2 {
        return Err(PhysicsError::InsufficientData {
            needed: 2,
            got: points.len(),
        });
    }

    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), &(x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
    );

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() <= f64::EPSILON * (n * sum_xx).abs() {
        return Err(PhysicsError::Degenerate {
            what: "least-squares abscissae",
        });
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok(LinearFit { slope, intercept })
}

/// Band gap recovered from an Arrhenius plot of `ln R` against `1/T`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandGapFit {
    pub line: LinearFit,
    pub band_gap_ev: f64,
    /// Evenly spaced points along the fitted line, for plotting.
    pub fit_line: Vec<(f64, f64)>,
}

/// Number of segments drawn along the fitted line.
const FIT_LINE_SEGMENTS: usize = 10;

/// Fit `ln R = ln R0 + Eg/(2 kB) * (1/T)`; the slope `m` gives `Eg = 2 kB m`.
///
/// `points` are `(1/T, ln R)` pairs.
pub fn fit_band_gap(points: &[(f64, f64)]) -> PhysicsResult<BandGapFit> {
    let line = fit_line(points)?;
    let band_gap_ev = 2.0 * BOLTZMANN_EV_PER_K * line.slope;

    let (min_x, max_x) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
            (lo.min(x), hi.max(x))
        });
    let fit_line = (0..=FIT_LINE_SEGMENTS)
        .map(|i| {
            let x = min_x + (i as f64 / FIT_LINE_SEGMENTS as f64) * (max_x - min_x);
            (x, line.predict(x))
        })
        .collect();

    Ok(BandGapFit {
        line,
        band_gap_ev,
        fit_line,
    })
}
