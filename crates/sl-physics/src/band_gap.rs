//! Intrinsic resistance against temperature.
//!
//! `R = R0 * exp(Eg / (2 kB T))`

use crate::materials::Semiconductor;
use sl_core::constants::BOLTZMANN_EV_PER_K;
use sl_core::safe_exp;

/// One reading of the band-gap bench.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGapReading {
    pub temperature_k: f64,
    pub resistance_ohm: f64,
    pub inverse_temperature: f64,
    pub ln_resistance: f64,
}

/// Sample resistance at `temperature_k`. `None` for non-positive temperatures.
pub fn resistance(material: Semiconductor, temperature_k: f64) -> Option<BandGapReading> {
    if temperature_k <= 0.0 {
        return None;
    }
    let profile = material.profile();
    let exponent = profile.band_gap_ev / (2.0 * BOLTZMANN_EV_PER_K * temperature_k);
    let resistance_ohm = profile.reference_resistance_ohm * safe_exp(exponent);

    Some(BandGapReading {
        temperature_k,
        resistance_ohm,
        inverse_temperature: 1.0 / temperature_k,
        ln_resistance: resistance_ohm.ln(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_core::Catalog;

    #[test]
    fn silicon_at_room_temperature() {
        let reading = resistance(Semiconductor::Silicon, 300.0).unwrap();
        let exponent: f64 = 1.12 / (2.0 * 8.617333262e-5 * 300.0);
        assert!((exponent - 21.6617).abs() < 1e-3);
        let expected = 0.01 * exponent.exp();
        assert!((reading.resistance_ohm - expected).abs() / expected < 1e-12);
        assert!((2.5e7..2.6e7).contains(&reading.resistance_ohm));
        let ln_expected = 0.01f64.ln() + exponent;
        assert!((reading.ln_resistance - ln_expected).abs() < 1e-9);
    }

    #[test]
    fn resistance_falls_with_temperature() {
        for material in Semiconductor::ALL {
            let cold = resistance(*material, 150.0).unwrap();
            let hot = resistance(*material, 400.0).unwrap();
            assert!(cold.resistance_ohm > hot.resistance_ohm);
        }
    }

    #[test]
    fn zero_kelvin_is_out_of_domain() {
        assert!(resistance(Semiconductor::Germanium, 0.0).is_none());
    }
}
