//! One [`ExperimentModel`](crate::ExperimentModel) per experiment.

pub mod band_gap;
pub mod diode;
pub mod fiber;
pub mod four_probe;
pub mod hall;
pub mod ldr;
pub mod mobility;
pub mod photocell;
pub mod pn_junction;
pub mod solar;
pub mod xrd;

/// Control names shared by several experiments.
pub mod names {
    pub const MATERIAL: &str = "material";
    pub const TEMPERATURE_K: &str = "temperature_k";
    pub const VOLTAGE_V: &str = "voltage_v";
    pub const CURRENT_MA: &str = "current_ma";
    pub const THICKNESS_MM: &str = "thickness_mm";
    pub const WAVELENGTH_NM: &str = "wavelength_nm";
    pub const INTENSITY_PCT: &str = "intensity_pct";
}
