//! Hall effect: `Vh = Rh * I * B / t`.

use crate::materials::{CarrierType, Semiconductor};
use sl_core::units::si;
use sl_core::{Current, FluxDensity, Length, Potential, volts};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HallReading {
    pub hall_voltage: Potential,
    pub hall_coefficient_m3_per_c: f64,
    pub carrier_type: CarrierType,
    pub carrier_density_per_m3: f64,
}

impl HallReading {
    pub fn hall_voltage_mv(&self) -> f64 {
        si::volt(self.hall_voltage) * 1e3
    }
}

/// Hall voltage across a slab of thickness `thickness`. `None` for a slab
/// of zero thickness.
pub fn hall_voltage(
    material: Semiconductor,
    current: Current,
    field: FluxDensity,
    thickness: Length,
) -> Option<HallReading> {
    let t = si::meter(thickness);
    if t <= 0.0 {
        return None;
    }
    let profile = material.profile();
    let rh = profile.hall_coefficient_m3_per_c;
    let vh = rh * si::ampere(current) * si::tesla(field) / t;

    Some(HallReading {
        hall_voltage: volts(vh),
        hall_coefficient_m3_per_c: rh,
        carrier_type: profile.carrier_type,
        carrier_density_per_m3: profile.carrier_density_per_m3,
    })
}
