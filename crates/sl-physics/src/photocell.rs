//! Photocell spectral response.

use crate::materials::Semiconductor;

/// Relative spectral response in `[0, 1]`.
///
/// Gaussian around the material's peak wavelength with a half-width of half
/// the peak-to-cutoff distance, derated for quantum-efficiency loss below
/// the peak and zero past the cutoff.
pub fn spectral_response(material: Semiconductor, wavelength_nm: f64) -> f64 {
    let photo = material.profile().photo;
    if wavelength_nm > photo.cutoff_wavelength_nm || wavelength_nm <= 0.0 {
        return 0.0;
    }
    let half_width = (photo.cutoff_wavelength_nm - photo.peak_wavelength_nm) / 2.0;
    let dist = wavelength_nm - photo.peak_wavelength_nm;
    let mut response = (-(dist * dist) / (2.0 * half_width * half_width)).exp();
    if wavelength_nm < photo.peak_wavelength_nm {
        response *= 0.5 + 0.5 * wavelength_nm / photo.peak_wavelength_nm;
    }
    response
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotocellReading {
    pub wavelength_nm: f64,
    pub intensity_pct: f64,
    pub response: f64,
    /// Display-scaled photocurrent (µA)
    pub current_ua: f64,
}

pub fn photocurrent(
    material: Semiconductor,
    wavelength_nm: f64,
    intensity_pct: f64,
    bias_v: f64,
) -> PhotocellReading {
    let response = spectral_response(material, wavelength_nm);
    let responsivity = material.profile().photo.responsivity_a_per_w;
    PhotocellReading {
        wavelength_nm,
        intensity_pct,
        response,
        current_ua: responsivity * (intensity_pct / 100.0) * response * bias_v * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_response_is_unity() {
        let peak = spectral_response(Semiconductor::Silicon, 800.0);
        assert!((peak - 1.0).abs() < 1e-12);
    }

    #[test]
    fn beyond_cutoff_is_dark() {
        let response = spectral_response(Semiconductor::GalliumArsenide, 900.0);
        assert_eq!(response, 0.0);
        let reading = photocurrent(Semiconductor::Silicon, 1200.0, 100.0, 5.0);
        assert_eq!(reading.current_ua, 0.0);
    }

    #[test]
    fn short_wavelengths_lose_efficiency() {
        // 200 nm below and above peak are equally far; the blue side is derated
        let blue = spectral_response(Semiconductor::Silicon, 600.0);
        let red = spectral_response(Semiconductor::Silicon, 1000.0);
        assert!(blue < red);
    }

    #[test]
    fn current_scales_with_intensity_and_bias() {
        let base = photocurrent(Semiconductor::Germanium, 1500.0, 50.0, 5.0).current_ua;
        assert!((base - 0.7 * 0.5 * 5.0 * 100.0).abs() < 1e-9);
        let doubled = photocurrent(Semiconductor::Germanium, 1500.0, 100.0, 5.0).current_ua;
        assert!((doubled - 2.0 * base).abs() < 1e-9);
    }
}
