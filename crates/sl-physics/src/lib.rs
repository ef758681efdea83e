//! sl-physics: closed-form formula evaluators for the semiconductor lab.
//!
//! Provides:
//! - Material catalogs (semiconductors, diodes, LDR materials, lattices)
//! - One evaluator per experiment (diode equation, Hall voltage, band-gap
//!   resistance, four-probe resistivity, LDR power law, carrier mobility,
//!   X-ray diffraction, fiber attenuation, photocell and solar-cell response)
//! - Least-squares band-gap recovery
//! - Seedable measurement noise
//!
//! Every evaluator is total over its clamped input domain. Exponentials go
//! through [`sl_core::safe_exp`]; results that are undefined for a given
//! input (division by zero, `sin θ > 1`) come back as `None` so callers can
//! drop the point instead of propagating an error.

pub mod band_gap;
pub mod diode;
pub mod error;
pub mod fiber;
pub mod four_probe;
pub mod hall;
pub mod ldr;
pub mod materials;
pub mod mobility;
pub mod noise;
pub mod photocell;
pub mod regression;
pub mod solar;
pub mod xrd;

pub use error::{PhysicsError, PhysicsResult};
pub use materials::{
    AttenuationModel, CarrierType, DiodeKind, LatticeType, LdrMaterial, Semiconductor,
    SemiconductorProfile,
};
pub use noise::SeededNoise;
pub use regression::{BandGapFit, LinearFit, fit_band_gap, fit_line};
