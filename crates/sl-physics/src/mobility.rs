//! Carrier mobility with toggleable scattering mechanisms.
//!
//! Active mechanisms derate the lattice mobility multiplicatively; the
//! result never drops below [`MOBILITY_FLOOR`].

use crate::materials::Semiconductor;
use sl_core::constants::REFERENCE_TEMPERATURE_K;

/// Exponent of the phonon-limited temperature law.
pub const PHONON_EXPONENT: f64 = -1.5;
/// Doping density at which impurity scattering halves mobility (cm⁻³).
pub const IMPURITY_REFERENCE_DENSITY: f64 = 1e16;
/// Doping above which carrier-carrier scattering applies (cm⁻³).
pub const CARRIER_SCATTERING_THRESHOLD: f64 = 1e18;
pub const CARRIER_SCATTERING_DERATE: f64 = 0.8;
/// cm²/V·s
pub const MOBILITY_FLOOR: f64 = 10.0;

/// Which scattering mechanisms are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatteringMechanisms {
    pub phonon: bool,
    pub impurity: bool,
    pub carrier_carrier: bool,
}

impl Default for ScatteringMechanisms {
    fn default() -> Self {
        Self {
            phonon: true,
            impurity: true,
            carrier_carrier: false,
        }
    }
}

/// Mobility in cm²/V·s. `None` for a non-positive temperature.
pub fn carrier_mobility(
    material: Semiconductor,
    temperature_k: f64,
    doping_per_cm3: f64,
    mechanisms: ScatteringMechanisms,
) -> Option<f64> {
    if temperature_k <= 0.0 {
        return None;
    }
    let mut mobility = material.profile().base_mobility_cm2_per_vs;

    if mechanisms.phonon {
        mobility *= (temperature_k / REFERENCE_TEMPERATURE_K).powf(PHONON_EXPONENT);
    }
    if mechanisms.impurity {
        mobility *= 1.0 / (1.0 + (doping_per_cm3.max(0.0) / IMPURITY_REFERENCE_DENSITY).sqrt());
    }
    if mechanisms.carrier_carrier && doping_per_cm3 > CARRIER_SCATTERING_THRESHOLD {
        mobility *= CARRIER_SCATTERING_DERATE;
    }

    Some(mobility.max(MOBILITY_FLOOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: ScatteringMechanisms = ScatteringMechanisms {
        phonon: false,
        impurity: false,
        carrier_carrier: false,
    };

    #[test]
    fn no_scattering_returns_lattice_mobility() {
        let mu = carrier_mobility(Semiconductor::Germanium, 150.0, 1e17, NONE).unwrap();
        assert_eq!(mu, 3900.0);
    }

    #[test]
    fn phonon_and_impurity_at_reference_point() {
        let mu = carrier_mobility(
            Semiconductor::Silicon,
            300.0,
            1e16,
            ScatteringMechanisms::default(),
        )
        .unwrap();
        assert!((mu - 725.0).abs() < 1e-9);
    }

    #[test]
    fn carrier_scattering_only_above_threshold() {
        let mechanisms = ScatteringMechanisms {
            carrier_carrier: true,
            ..NONE
        };
        let low = carrier_mobility(Semiconductor::Silicon, 300.0, 1e18, mechanisms).unwrap();
        let high = carrier_mobility(Semiconductor::Silicon, 300.0, 2e18, mechanisms).unwrap();
        assert_eq!(low, 1450.0);
        assert!((high - 1160.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_doping_hits_the_floor() {
        let mechanisms = ScatteringMechanisms {
            phonon: true,
            impurity: true,
            carrier_carrier: true,
        };
        let mu = carrier_mobility(Semiconductor::Silicon, 500.0, 1e19, mechanisms).unwrap();
        assert!(mu >= MOBILITY_FLOOR);
    }

    #[test]
    fn hotter_lattice_scatters_more() {
        let mechanisms = ScatteringMechanisms::default();
        let cold = carrier_mobility(Semiconductor::GalliumArsenide, 200.0, 1e15, mechanisms);
        let hot = carrier_mobility(Semiconductor::GalliumArsenide, 400.0, 1e15, mechanisms);
        assert!(hot < cold);
    }
}
