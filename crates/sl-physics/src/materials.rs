//! Material and selector catalogs.
//!
//! Profiles are `const` tables looked up read-only by the evaluators.

use sl_core::Catalog;

/// Majority carrier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierType {
    /// Electrons (negative Hall coefficient)
    NType,
    /// Holes (positive Hall coefficient)
    PType,
}

impl CarrierType {
    pub fn label(self) -> &'static str {
        match self {
            Self::NType => "n-type",
            Self::PType => "p-type",
        }
    }
}

/// Spectral response data for photodetector experiments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoResponse {
    pub peak_wavelength_nm: f64,
    pub responsivity_a_per_w: f64,
    pub cutoff_wavelength_nm: f64,
}

/// Constants for one semiconductor, shared by every experiment that offers
/// a material selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemiconductorProfile {
    pub name: &'static str,
    /// Band gap at 300 K (eV)
    pub band_gap_ev: f64,
    /// Prefactor `R0` of the intrinsic resistance law (Ohm)
    pub reference_resistance_ohm: f64,
    /// Temperature slider range of the band-gap bench (K)
    pub temperature_range_k: (f64, f64),
    /// Hall coefficient (m³/C); sign follows the majority carrier
    pub hall_coefficient_m3_per_c: f64,
    pub carrier_type: CarrierType,
    /// Majority carrier density (m⁻³)
    pub carrier_density_per_m3: f64,
    /// Bulk resistivity (Ohm·cm)
    pub resistivity_ohm_cm: f64,
    /// Lattice-limited mobility at 300 K (cm²/V·s)
    pub base_mobility_cm2_per_vs: f64,
    /// Effective mass ratio m*/m0
    pub effective_mass_ratio: f64,
    pub photo: PhotoResponse,
}

const SILICON: SemiconductorProfile = SemiconductorProfile {
    name: "Silicon",
    band_gap_ev: 1.12,
    reference_resistance_ohm: 0.01,
    temperature_range_k: (100.0, 500.0),
    hall_coefficient_m3_per_c: -4e-4,
    carrier_type: CarrierType::NType,
    carrier_density_per_m3: 1.5e22,
    resistivity_ohm_cm: 1000.0,
    base_mobility_cm2_per_vs: 1450.0,
    effective_mass_ratio: 1.08,
    photo: PhotoResponse {
        peak_wavelength_nm: 800.0,
        responsivity_a_per_w: 0.5,
        cutoff_wavelength_nm: 1100.0,
    },
};

const GERMANIUM: SemiconductorProfile = SemiconductorProfile {
    name: "Germanium",
    band_gap_ev: 0.67,
    reference_resistance_ohm: 0.005,
    temperature_range_k: (100.0, 400.0),
    hall_coefficient_m3_per_c: -3e-3,
    carrier_type: CarrierType::NType,
    carrier_density_per_m3: 2.4e21,
    resistivity_ohm_cm: 60.0,
    base_mobility_cm2_per_vs: 3900.0,
    effective_mass_ratio: 0.55,
    photo: PhotoResponse {
        peak_wavelength_nm: 1500.0,
        responsivity_a_per_w: 0.7,
        cutoff_wavelength_nm: 1800.0,
    },
};

const GALLIUM_ARSENIDE: SemiconductorProfile = SemiconductorProfile {
    name: "Gallium Arsenide",
    band_gap_ev: 1.42,
    reference_resistance_ohm: 0.02,
    temperature_range_k: (100.0, 600.0),
    hall_coefficient_m3_per_c: 1e-2,
    carrier_type: CarrierType::PType,
    carrier_density_per_m3: 9.0e21,
    resistivity_ohm_cm: 1e8,
    base_mobility_cm2_per_vs: 8500.0,
    effective_mass_ratio: 0.067,
    photo: PhotoResponse {
        peak_wavelength_nm: 850.0,
        responsivity_a_per_w: 0.6,
        cutoff_wavelength_nm: 870.0,
    },
};

/// Selectable semiconductor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semiconductor {
    Silicon,
    Germanium,
    GalliumArsenide,
}

impl Semiconductor {
    pub fn profile(self) -> &'static SemiconductorProfile {
        match self {
            Self::Silicon => &SILICON,
            Self::Germanium => &GERMANIUM,
            Self::GalliumArsenide => &GALLIUM_ARSENIDE,
        }
    }
}

impl Catalog for Semiconductor {
    const KIND: &'static str = "material";
    const ALL: &'static [Self] = &[Self::Silicon, Self::Germanium, Self::GalliumArsenide];

    fn id(self) -> &'static str {
        match self {
            Self::Silicon => "silicon",
            Self::Germanium => "germanium",
            Self::GalliumArsenide => "gallium_arsenide",
        }
    }

    fn label(self) -> &'static str {
        self.profile().name
    }
}

/// Diode families offered by the I-V bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiodeKind {
    Silicon,
    Germanium,
    Schottky,
    Led,
}

impl DiodeKind {
    /// Saturation current at 300 K (A).
    pub fn saturation_current_a(self) -> f64 {
        match self {
            Self::Silicon => 1e-12,
            Self::Germanium => 1e-6,
            Self::Schottky => 1e-8,
            Self::Led => 1e-10,
        }
    }
}

impl Catalog for DiodeKind {
    const KIND: &'static str = "diode type";
    const ALL: &'static [Self] = &[Self::Silicon, Self::Germanium, Self::Schottky, Self::Led];

    fn id(self) -> &'static str {
        match self {
            Self::Silicon => "silicon",
            Self::Germanium => "germanium",
            Self::Schottky => "schottky",
            Self::Led => "led",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Silicon => "Silicon",
            Self::Germanium => "Germanium",
            Self::Schottky => "Schottky",
            Self::Led => "LED",
        }
    }
}

/// Photoconductive materials for light-dependent resistors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LdrMaterial {
    CadmiumSulfide,
    CadmiumSelenide,
    LeadSulfide,
}

impl LdrMaterial {
    /// Resistance at the reference illumination (kOhm).
    pub fn dark_resistance_kohm(self) -> f64 {
        match self {
            Self::CadmiumSulfide => 100.0,
            Self::CadmiumSelenide => 75.0,
            Self::LeadSulfide => 120.0,
        }
    }

    pub fn peak_sensitivity_nm(self) -> f64 {
        match self {
            Self::CadmiumSulfide => 520.0,
            Self::CadmiumSelenide => 730.0,
            Self::LeadSulfide => 1500.0,
        }
    }

    pub fn response_time_ms(self) -> f64 {
        match self {
            Self::CadmiumSulfide => 30.0,
            Self::CadmiumSelenide => 15.0,
            Self::LeadSulfide => 10.0,
        }
    }
}

impl Catalog for LdrMaterial {
    const KIND: &'static str = "LDR material";
    const ALL: &'static [Self] = &[
        Self::CadmiumSulfide,
        Self::CadmiumSelenide,
        Self::LeadSulfide,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::CadmiumSulfide => "cadmium_sulfide",
            Self::CadmiumSelenide => "cadmium_selenide",
            Self::LeadSulfide => "lead_sulfide",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::CadmiumSulfide => "Cadmium Sulfide (CdS)",
            Self::CadmiumSelenide => "Cadmium Selenide (CdSe)",
            Self::LeadSulfide => "Lead Sulfide (PbS)",
        }
    }
}

/// Cubic lattice types with distinct extinction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatticeType {
    SimpleCubic,
    BodyCentered,
    FaceCentered,
    Diamond,
}

impl Catalog for LatticeType {
    const KIND: &'static str = "structure type";
    const ALL: &'static [Self] = &[
        Self::SimpleCubic,
        Self::BodyCentered,
        Self::FaceCentered,
        Self::Diamond,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::SimpleCubic => "sc",
            Self::BodyCentered => "bcc",
            Self::FaceCentered => "fcc",
            Self::Diamond => "diamond",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::SimpleCubic => "Simple Cubic",
            Self::BodyCentered => "Body-Centered Cubic",
            Self::FaceCentered => "Face-Centered Cubic",
            Self::Diamond => "Diamond Cubic",
        }
    }
}

/// How the fiber bench obtains its attenuation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttenuationModel {
    /// Coefficient taken from the slider
    Fixed,
    /// Coefficient computed from wavelength (Rayleigh + IR + OH terms)
    Spectral,
}

impl Catalog for AttenuationModel {
    const KIND: &'static str = "attenuation model";
    const ALL: &'static [Self] = &[Self::Fixed, Self::Spectral];

    fn id(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Spectral => "spectral",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Fixed => "Fixed coefficient",
            Self::Spectral => "Wavelength dependent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hall_sign_matches_carrier_type() {
        for material in Semiconductor::ALL {
            let profile = material.profile();
            match profile.carrier_type {
                CarrierType::NType => assert!(profile.hall_coefficient_m3_per_c < 0.0),
                CarrierType::PType => assert!(profile.hall_coefficient_m3_per_c > 0.0),
            }
        }
    }

    #[test]
    fn selector_ids_round_trip() {
        for material in Semiconductor::ALL {
            assert_eq!(Semiconductor::from_id(material.id()).unwrap(), *material);
        }
        for lattice in LatticeType::ALL {
            assert_eq!(LatticeType::from_id(lattice.id()).unwrap(), *lattice);
        }
        assert_eq!(DiodeKind::from_id("LED").unwrap(), DiodeKind::Led);
        assert!(LdrMaterial::from_id("selenium").is_err());
    }

    #[test]
    fn temperature_ranges_are_ordered() {
        for material in Semiconductor::ALL {
            let (lo, hi) = material.profile().temperature_range_k;
            assert!(lo < hi);
        }
    }
}
