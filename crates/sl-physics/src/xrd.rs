//! Powder X-ray diffraction from a cubic lattice.
//!
//! Reflections are enumerated for Miller indices in `0..=MAX_MILLER_INDEX`,
//! filtered by the lattice's extinction rule and Bragg's law, then sorted by
//! ascending `2θ`.

use crate::materials::LatticeType;
use sl_core::snap_to_step;
use std::fmt;

pub const MAX_MILLER_INDEX: u8 = 3;
/// Peaks are clipped at this relative intensity.
pub const MAX_INTENSITY: f64 = 100.0;

/// Miller indices of a lattice plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Miller {
    pub h: u8,
    pub k: u8,
    pub l: u8,
}

impl Miller {
    pub const fn new(h: u8, k: u8, l: u8) -> Self {
        Self { h, k, l }
    }

    fn sum(self) -> u32 {
        u32::from(self.h) + u32::from(self.k) + u32::from(self.l)
    }

    fn norm_sq(self) -> f64 {
        let (h, k, l) = (f64::from(self.h), f64::from(self.k), f64::from(self.l));
        h * h + k * k + l * l
    }

    fn same_parity(self) -> bool {
        self.h % 2 == self.k % 2 && self.k % 2 == self.l % 2
    }

    /// Number of equivalent planes counted by the simplified powder model.
    pub fn multiplicity(self) -> u32 {
        if self.h == self.k && self.k == self.l {
            1
        } else if self.h == self.k || self.k == self.l || self.h == self.l {
            3
        } else {
            6
        }
    }
}

impl fmt::Display for Miller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{}{})", self.h, self.k, self.l)
    }
}

impl LatticeType {
    /// Structure-factor rule: whether `(hkl)` reflects for this lattice.
    pub fn allows(self, m: Miller) -> bool {
        match self {
            Self::SimpleCubic => true,
            Self::BodyCentered => m.sum() % 2 == 0,
            Self::FaceCentered => m.same_parity(),
            Self::Diamond => m.same_parity() && m.sum() % 4 != 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    pub miller: Miller,
    pub d_spacing_nm: f64,
    pub two_theta_deg: f64,
    pub intensity: f64,
}

/// Diffractometer settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diffractometer {
    pub wavelength_nm: f64,
    /// Detector angular resolution; `2θ` is reported on this grid (deg).
    pub resolution_deg: f64,
}

impl Diffractometer {
    pub fn new(wavelength_nm: f64, resolution_deg: f64) -> Self {
        Self {
            wavelength_nm,
            resolution_deg,
        }
    }

    /// All allowed reflections for a cubic lattice of constant `a`.
    pub fn pattern(&self, lattice: LatticeType, lattice_constant_nm: f64) -> Vec<Reflection> {
        if lattice_constant_nm <= 0.0 || self.wavelength_nm <= 0.0 {
            return Vec::new();
        }
        let mut peaks = Vec::new();
        for h in 0..=MAX_MILLER_INDEX {
            for k in 0..=MAX_MILLER_INDEX {
                for l in 0..=MAX_MILLER_INDEX {
                    let miller = Miller::new(h, k, l);
                    if miller.sum() == 0 || !lattice.allows(miller) {
                        continue;
                    }
                    if let Some(peak) = self.reflect(miller, lattice_constant_nm) {
                        peaks.push(peak);
                    }
                }
            }
        }
        peaks.sort_by(|a, b| {
            a.two_theta_deg
                .total_cmp(&b.two_theta_deg)
                .then(a.miller.cmp(&b.miller))
        });
        peaks
    }

    fn reflect(&self, miller: Miller, lattice_constant_nm: f64) -> Option<Reflection> {
        let d = lattice_constant_nm / miller.norm_sq().sqrt();
        let sin_theta = self.wavelength_nm / (2.0 * d);
        if sin_theta > 1.0 {
            return None;
        }
        let two_theta = self.quantize(2.0 * sin_theta.asin().to_degrees());
        let sin_sq = (two_theta.to_radians() / 2.0).sin().powi(2);
        let intensity = if sin_sq > 0.0 {
            (f64::from(miller.multiplicity()) / sin_sq).min(MAX_INTENSITY)
        } else {
            MAX_INTENSITY
        };
        Some(Reflection {
            miller,
            d_spacing_nm: d,
            two_theta_deg: two_theta,
            intensity,
        })
    }

    fn quantize(&self, angle_deg: f64) -> f64 {
        if self.resolution_deg > 0.0 {
            snap_to_step(angle_deg, 0.0, self.resolution_deg)
        } else {
            angle_deg
        }
    }

    /// Recover the lattice constant from the lowest-angle peak by inverting
    /// Bragg's law. `None` for an empty pattern.
    pub fn back_calculate(
        &self,
        pattern: &[Reflection],
        true_constant_nm: f64,
    ) -> Option<LatticeEstimate> {
        let first = pattern.first()?;
        let theta = first.two_theta_deg.to_radians() / 2.0;
        let d = self.wavelength_nm / (2.0 * theta.sin());
        let estimate = d * first.miller.norm_sq().sqrt();
        let deviation = (estimate - true_constant_nm).abs();
        Some(LatticeEstimate {
            from: first.miller,
            lattice_constant_nm: estimate,
            deviation_nm: deviation,
            deviation_pct: if true_constant_nm != 0.0 {
                deviation / true_constant_nm * 100.0
            } else {
                f64::INFINITY
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeEstimate {
    /// Peak the estimate was derived from
    pub from: Miller,
    pub lattice_constant_nm: f64,
    pub deviation_nm: f64,
    pub deviation_pct: f64,
}
