//! Light-dependent resistor: `R = R_dark · (E0 / E)^γ`.

use crate::materials::LdrMaterial;

/// Illumination at which the resistor shows its dark-resistance rating (%).
pub const REFERENCE_ILLUMINATION_PCT: f64 = 100.0;
/// Power-law exponent of the photoconductive response.
pub const GAMMA: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdrReading {
    pub voltage_v: f64,
    pub illumination_pct: f64,
    pub resistance_kohm: f64,
    pub current_ma: f64,
}

pub fn ldr_resistance_kohm(material: LdrMaterial, illumination_pct: f64) -> Option<f64> {
    if illumination_pct <= 0.0 {
        return None;
    }
    let ratio = REFERENCE_ILLUMINATION_PCT / illumination_pct;
    Some(material.dark_resistance_kohm() * ratio.powf(GAMMA))
}

/// Reading at a bias voltage. Darkness (`E = 0`) has no finite resistance
/// and yields `None`.
pub fn ldr_reading(
    material: LdrMaterial,
    voltage_v: f64,
    illumination_pct: f64,
) -> Option<LdrReading> {
    let resistance_kohm = ldr_resistance_kohm(material, illumination_pct)?;
    Some(LdrReading {
        voltage_v,
        illumination_pct,
        resistance_kohm,
        // V / kOhm is already mA
        current_ma: voltage_v / resistance_kohm,
    })
}
