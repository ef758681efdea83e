//! Solar panel under a resistive load.

/// Panel output at full irradiance and 100 % efficiency (W).
pub const RATED_POWER_W: f64 = 120.0;
/// Fractional power loss per °C above 25 °C.
pub const TEMPERATURE_COEFFICIENT: f64 = 0.005;
pub const CURVE_POINTS: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarOperatingPoint {
    pub power_w: f64,
    pub voltage_v: f64,
    pub current_a: f64,
}

/// `None` for a non-positive load.
pub fn operating_point(
    efficiency: f64,
    irradiance: f64,
    temperature_c: f64,
    load_ohm: f64,
) -> Option<SolarOperatingPoint> {
    if load_ohm <= 0.0 {
        return None;
    }
    let derate = 1.0 - ((temperature_c - 25.0) * TEMPERATURE_COEFFICIENT).max(0.0);
    let power_w = (RATED_POWER_W * efficiency * irradiance * derate).max(0.0);
    let voltage_v = (power_w * load_ohm).sqrt();
    Some(SolarOperatingPoint {
        power_w,
        voltage_v,
        current_a: voltage_v / load_ohm,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IvSample {
    pub voltage_v: f64,
    pub current_a: f64,
    pub power_w: f64,
}

impl SolarOperatingPoint {
    /// Current at terminal voltage `v`: flat up to the operating voltage,
    /// then falling linearly. Negative currents are out of range.
    pub fn current_at(&self, v: f64) -> Option<f64> {
        if v <= self.voltage_v {
            return Some(self.current_a);
        }
        if self.voltage_v <= 0.0 {
            return None;
        }
        let i = self.current_a * (1.0 - (v - self.voltage_v) / self.voltage_v * 0.5);
        (i >= 0.0).then_some(i)
    }

    /// Upper end of the I-V curve, `1.5 · Vop`. The curve is sampled at
    /// [`CURVE_POINTS`] evenly spaced voltages from zero up to here.
    pub fn curve_max_voltage(&self) -> f64 {
        self.voltage_v * 1.5
    }

    /// One point of the I-V curve; `None` past the zero-current end.
    pub fn iv_sample(&self, voltage_v: f64) -> Option<IvSample> {
        let current_a = self.current_at(voltage_v)?;
        Some(IvSample {
            voltage_v,
            current_a,
            power_w: voltage_v * current_a,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_panel_operating_point() {
        let op = operating_point(0.15, 0.8, 25.0, 10.0).unwrap();
        assert!((op.power_w - 14.4).abs() < 1e-9);
        assert!((op.voltage_v - 12.0).abs() < 1e-9);
        assert!((op.current_a - 1.2).abs() < 1e-9);
    }

    #[test]
    fn heat_derates_power() {
        let cool = operating_point(0.15, 0.8, 25.0, 10.0).unwrap();
        let hot = operating_point(0.15, 0.8, 45.0, 10.0).unwrap();
        assert!((hot.power_w - cool.power_w * 0.9).abs() < 1e-9);
        // cold panels are not boosted
        let cold = operating_point(0.15, 0.8, 15.0, 10.0).unwrap();
        assert_eq!(cold.power_w, cool.power_w);
    }

    #[test]
    fn iv_curve_has_knee_at_operating_voltage() {
        let op = operating_point(0.15, 0.8, 25.0, 10.0).unwrap();
        assert!((op.curve_max_voltage() - 18.0).abs() < 1e-9);
        assert_eq!(op.iv_sample(0.0).unwrap().current_a, op.current_a);
        assert_eq!(op.iv_sample(op.voltage_v).unwrap().current_a, op.current_a);
        let last = op.iv_sample(op.curve_max_voltage()).unwrap();
        assert!((last.current_a - 0.75 * op.current_a).abs() < 1e-9);
        assert!((last.power_w - 18.0 * last.current_a).abs() < 1e-9);
    }

    #[test]
    fn zero_load_is_out_of_domain() {
        assert!(operating_point(0.15, 0.8, 25.0, 0.0).is_none());
    }
}
