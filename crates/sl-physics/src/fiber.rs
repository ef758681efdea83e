//! Optical fiber transmission: `Pout = Pin · 10^(−α·L/10)`.

use crate::materials::AttenuationModel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberReading {
    pub wavelength_nm: f64,
    pub length_km: f64,
    pub input_power_mw: f64,
    pub output_power_mw: f64,
    /// dB/km
    pub attenuation_db_per_km: f64,
    pub loss_db: f64,
}

pub fn output_power_mw(input_power_mw: f64, attenuation_db_per_km: f64, length_km: f64) -> f64 {
    input_power_mw * 10f64.powf(-attenuation_db_per_km * length_km / 10.0)
}

/// Empirical silica attenuation (dB/km): Rayleigh scattering, the infrared
/// absorption edge and the OH⁻ peak near 1380 nm.
pub fn spectral_attenuation_db_per_km(wavelength_nm: f64) -> Option<f64> {
    if wavelength_nm <= 0.0 {
        return None;
    }
    let rayleigh = 0.12 * (1550.0 / wavelength_nm).powi(4);
    let infrared = 0.1 * (-(1620.0 - wavelength_nm).powi(2) / 10_000.0).exp();
    let hydroxyl = 0.2 * (-(wavelength_nm - 1380.0).powi(2) / 5_000.0).exp();
    Some(rayleigh + infrared + hydroxyl)
}

impl AttenuationModel {
    /// Attenuation at `wavelength_nm`; `fixed_db_per_km` is used by
    /// [`AttenuationModel::Fixed`].
    pub fn coefficient(self, wavelength_nm: f64, fixed_db_per_km: f64) -> Option<f64> {
        match self {
            Self::Fixed => Some(fixed_db_per_km),
            Self::Spectral => spectral_attenuation_db_per_km(wavelength_nm),
        }
    }
}

pub fn fiber_transmission(
    model: AttenuationModel,
    wavelength_nm: f64,
    length_km: f64,
    input_power_mw: f64,
    fixed_db_per_km: f64,
) -> Option<FiberReading> {
    let alpha = model.coefficient(wavelength_nm, fixed_db_per_km)?;
    Some(FiberReading {
        wavelength_nm,
        length_km,
        input_power_mw,
        output_power_mw: output_power_mw(input_power_mw, alpha, length_km),
        attenuation_db_per_km: alpha,
        loss_db: alpha * length_km,
    })
}
