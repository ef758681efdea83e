//! Physical constants used by the formula evaluators.
//!
//! SI-defined values are exact since the 2019 redefinition. The eV-based
//! Boltzmann constant is the CODATA 2018 value.

/// Boltzmann constant _k_B_ in joules per kelvin (J/K). Exact.
pub const BOLTZMANN_J_PER_K: f64 = 1.380_649e-23;

/// Boltzmann constant _k_B_ in electronvolts per kelvin (eV/K).
pub const BOLTZMANN_EV_PER_K: f64 = 8.617_333_262e-5;

/// Elementary charge _q_ in coulombs (C). Exact.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Temperature the material tables are quoted at.
pub const REFERENCE_TEMPERATURE_K: f64 = 300.0;

/// Thermal voltage `kT/q` in volts.
#[inline]
pub fn thermal_voltage_v(temperature_k: f64) -> f64 {
    BOLTZMANN_J_PER_K * temperature_k / ELEMENTARY_CHARGE
}
