// sl-core/src/units.rs

use uom::si::f64::{
    ElectricCurrent as UomElectricCurrent, ElectricPotential as UomElectricPotential,
    Length as UomLength, MagneticFluxDensity as UomMagneticFluxDensity,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Current = UomElectricCurrent;
pub type Potential = UomElectricPotential;
pub type Length = UomLength;
pub type FluxDensity = UomMagneticFluxDensity;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn volts(v: f64) -> Potential {
    use uom::si::electric_potential::volt;
    Potential::new::<volt>(v)
}

#[inline]
pub fn milliamps(v: f64) -> Current {
    use uom::si::electric_current::milliampere;
    Current::new::<milliampere>(v)
}

#[inline]
pub fn tesla(v: f64) -> FluxDensity {
    use uom::si::magnetic_flux_density::tesla;
    FluxDensity::new::<tesla>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

/// Plain-SI accessors so evaluators can drop to `f64` arithmetic.
pub mod si {
    use super::*;

    #[inline]
    pub fn kelvin(t: Temperature) -> f64 {
        t.get::<uom::si::thermodynamic_temperature::kelvin>()
    }

    #[inline]
    pub fn volt(v: Potential) -> f64 {
        v.get::<uom::si::electric_potential::volt>()
    }

    #[inline]
    pub fn ampere(i: Current) -> f64 {
        i.get::<uom::si::electric_current::ampere>()
    }

    #[inline]
    pub fn tesla(b: FluxDensity) -> f64 {
        b.get::<uom::si::magnetic_flux_density::tesla>()
    }

    #[inline]
    pub fn meter(l: Length) -> f64 {
        l.get::<uom::si::length::meter>()
    }
}
