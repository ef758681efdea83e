//! Shockley diode equation.
//!
//! `I = Is * (exp(V / (n Vt)) - 1)` with `Vt = kT/q`.
//!
//! The thermal voltage is the physical `kT/q`; no empirical scale factor is
//! folded into the denominator. The exponent is capped by `safe_exp`, so
//! far-forward bias saturates at a large finite current instead of
//! overflowing.

use crate::materials::DiodeKind;
use sl_core::constants::{REFERENCE_TEMPERATURE_K, thermal_voltage_v};
use sl_core::units::si;
use sl_core::{Potential, Temperature, k, safe_exp, volts};

/// Voltages closer to zero than this have no defined static resistance.
const ZERO_BIAS_V: f64 = 1e-12;

/// Ideality factor of the PN-junction bench.
pub const JUNCTION_IDEALITY: f64 = 1.5;

/// Band gap used for the junction's saturation current (eV).
pub const JUNCTION_BAND_GAP_EV: f64 = 1.1;

/// Saturation-current prefactor of the PN-junction bench (A).
pub const JUNCTION_PREFACTOR_A: f64 = 1e-12;

/// Smallest magnitude reported for log-scale plotting (A).
pub const LOG_PLOT_FLOOR_A: f64 = 1e-20;

/// Thermal voltage `kT/q`.
pub fn thermal_voltage(temperature: Temperature) -> Potential {
    volts(thermal_voltage_v(si::kelvin(temperature)))
}

/// `Is(T) = Is0 * (T / 300 K)^3`
pub fn saturation_current_a(kind: DiodeKind, temperature_k: f64) -> f64 {
    kind.saturation_current_a() * (temperature_k / REFERENCE_TEMPERATURE_K).powi(3)
}

/// Shockley current for a given saturation current. `None` when the
/// temperature or ideality factor is not positive.
pub fn shockley_current_a(
    saturation_a: f64,
    voltage_v: f64,
    ideality: f64,
    temperature: Temperature,
) -> Option<f64> {
    let vt = si::volt(thermal_voltage(temperature));
    if vt <= 0.0 || ideality <= 0.0 {
        return None;
    }
    Some(saturation_a * (safe_exp(voltage_v / (ideality * vt)) - 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiodeReading {
    pub voltage_v: f64,
    pub current_a: f64,
    /// Static resistance `V / I`; undefined at zero bias.
    pub resistance_ohm: Option<f64>,
}

pub fn diode_iv(
    kind: DiodeKind,
    voltage_v: f64,
    temperature_k: f64,
    ideality: f64,
) -> Option<DiodeReading> {
    let saturation = saturation_current_a(kind, temperature_k);
    let current_a = shockley_current_a(saturation, voltage_v, ideality, k(temperature_k))?;
    let resistance_ohm =
        (voltage_v.abs() > ZERO_BIAS_V && current_a != 0.0).then(|| voltage_v / current_a);

    Some(DiodeReading {
        voltage_v,
        current_a,
        resistance_ohm,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionReading {
    pub voltage_v: f64,
    pub temperature_k: f64,
    pub current_a: f64,
    /// `|I|`, floored at [`LOG_PLOT_FLOOR_A`]
    pub magnitude_a: f64,
}

/// PN junction with a temperature-activated saturation current:
/// `Is = Is0 * (T/300)^3 * exp(-Eg / (n Vt))`.
pub fn pn_junction(voltage_v: f64, temperature_k: f64) -> Option<JunctionReading> {
    let temperature = k(temperature_k);
    let vt = si::volt(thermal_voltage(temperature));
    if vt <= 0.0 {
        return None;
    }
    let saturation = JUNCTION_PREFACTOR_A
        * (temperature_k / REFERENCE_TEMPERATURE_K).powi(3)
        * safe_exp(-JUNCTION_BAND_GAP_EV / (JUNCTION_IDEALITY * vt));
    let current_a = shockley_current_a(saturation, voltage_v, JUNCTION_IDEALITY, temperature)?;

    Some(JunctionReading {
        voltage_v,
        temperature_k,
        current_a,
        magnitude_a: current_a.abs().max(LOG_PLOT_FLOOR_A),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sl_core::Catalog;

    #[test]
    fn zero_bias_has_zero_current_and_no_resistance() {
        let reading = diode_iv(DiodeKind::Silicon, 0.0, 300.0, 1.5).unwrap();
        assert_eq!(reading.current_a, 0.0);
        assert!(reading.resistance_ohm.is_none());
    }

    #[test]
    fn reverse_bias_saturates_at_minus_is() {
        let reading = diode_iv(DiodeKind::Germanium, -0.5, 300.0, 1.0).unwrap();
        assert!((reading.current_a + 1e-6).abs() < 1e-9);
    }

    #[test]
    fn forward_current_follows_shockley() {
        let vt = si::volt(thermal_voltage(k(300.0)));
        let reading = diode_iv(DiodeKind::Silicon, 0.6, 300.0, 2.0).unwrap();
        let expected = 1e-12 * ((0.6 / (2.0 * vt)).exp() - 1.0);
        assert!((reading.current_a - expected).abs() / expected < 1e-12);
        assert!(reading.resistance_ohm.unwrap() > 0.0);
    }

    #[test]
    fn saturation_current_scales_with_cube_of_temperature() {
        let hot = saturation_current_a(DiodeKind::Led, 600.0);
        let ratio = hot / saturation_current_a(DiodeKind::Led, 300.0);
        assert!((ratio - 8.0).abs() < 1e-12);
    }

    #[test]
    fn huge_forward_bias_stays_finite() {
        let reading = diode_iv(DiodeKind::Germanium, 1.0e3, 250.0, 1.0).unwrap();
        assert!(reading.current_a.is_finite());
    }

    #[test]
    fn junction_reverse_current_is_tiny_and_floored() {
        let reading = pn_junction(-0.6, 300.0).unwrap();
        assert!(reading.current_a < 0.0);
        assert!(reading.magnitude_a >= LOG_PLOT_FLOOR_A);
        let forward = pn_junction(0.8, 300.0).unwrap();
        assert!(forward.current_a > 0.0);
        assert!(forward.magnitude_a > reading.magnitude_a);
    }

    #[test]
    fn junction_current_rises_with_temperature() {
        let cold = pn_junction(0.5, 250.0).unwrap();
        let hot = pn_junction(0.5, 500.0).unwrap();
        assert!(hot.current_a > cold.current_a);
    }

    proptest! {
        #[test]
        fn diode_current_is_finite_and_monotone(
            kind_index in 0usize..4,
            v1 in -0.5_f64..1.0,
            v2 in -0.5_f64..1.0,
            temperature_k in 250.0_f64..400.0,
            ideality in 1.0_f64..2.0,
        ) {
            let kind = DiodeKind::ALL[kind_index];
            let (lo, hi) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
            let a = diode_iv(kind, lo, temperature_k, ideality).unwrap();
            let b = diode_iv(kind, hi, temperature_k, ideality).unwrap();
            prop_assert!(a.current_a.is_finite() && b.current_a.is_finite());
            prop_assert!(a.current_a <= b.current_a);
        }
    }
}
