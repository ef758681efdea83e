//! Four-point probe on a bulk sample.
//!
//! The true resistivity is perturbed by seeded noise whose spread grows with
//! sample thickness; the probe voltage follows `V = I ρ / (2π s)` and the
//! bench recovers `ρ = V / I · 2π s`.

use crate::materials::Semiconductor;
use crate::noise::SeededNoise;
use std::f64::consts::PI;

/// Half-width of the relative noise band before thickness scaling.
const NOISE_HALF_WIDTH: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourProbeReading {
    pub current_ma: f64,
    pub voltage_v: f64,
    /// Resistivity recovered from the probe voltage (Ohm·cm)
    pub resistivity_ohm_cm: f64,
}

/// `None` when current or probe spacing is zero.
pub fn four_probe(
    material: Semiconductor,
    current_ma: f64,
    probe_spacing_mm: f64,
    thickness_mm: f64,
    noise: &SeededNoise,
) -> Option<FourProbeReading> {
    if current_ma <= 0.0 || probe_spacing_mm <= 0.0 {
        return None;
    }
    let u = noise.uniform(
        &[material.profile().resistivity_ohm_cm, current_ma, probe_spacing_mm, thickness_mm],
        -NOISE_HALF_WIDTH,
        NOISE_HALF_WIDTH,
    );
    let actual_resistivity = material.profile().resistivity_ohm_cm * (1.0 + thickness_mm * 0.1 * u);

    let current_a = current_ma / 1000.0;
    let spacing_cm = probe_spacing_mm / 10.0;
    let voltage_v = current_a * actual_resistivity / (2.0 * PI * spacing_cm);

    Some(FourProbeReading {
        current_ma,
        voltage_v,
        resistivity_ohm_cm: voltage_v / current_a * 2.0 * PI * spacing_cm,
    })
}
