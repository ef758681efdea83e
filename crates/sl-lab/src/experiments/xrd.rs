//! X-ray diffraction pattern of a cubic lattice.
//!
//! Several reflections can share a diffraction angle, so the Miller indices
//! are key columns alongside 2θ.

use super::names::WAVELENGTH_NM;
use crate::config::LabConfig;
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::LatticeType;
use sl_physics::xrd::{Diffractometer, Reflection};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};

pub const LATTICE: &str = "lattice_type";
pub const LATTICE_CONSTANT_NM: &str = "lattice_constant_nm";

pub const TWO_THETA_COLUMN: usize = 4;

#[derive(Debug, Clone)]
pub struct XrayDiffraction {
    resolution_deg: f64,
}

impl XrayDiffraction {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            resolution_deg: config.xray.angular_resolution_deg,
        }
    }

    fn pattern(&self, controls: &ControlState) -> LabResult<(Diffractometer, Vec<Reflection>)> {
        let instrument = Diffractometer::new(controls.number(WAVELENGTH_NM)?, self.resolution_deg);
        let pattern = instrument.pattern(
            controls.choice::<LatticeType>(LATTICE)?,
            controls.number(LATTICE_CONSTANT_NM)?,
        );
        Ok((instrument, pattern))
    }
}

fn point(r: &Reflection) -> MeasurementPoint {
    MeasurementPoint::new(vec![
        f64::from(r.miller.h),
        f64::from(r.miller.k),
        f64::from(r.miller.l),
        r.d_spacing_nm,
        r.two_theta_deg,
        r.intensity,
    ])
}

impl ExperimentModel for XrayDiffraction {
    fn id(&self) -> ExperimentId {
        ExperimentId::XrayDiffraction
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(LATTICE, "Crystal structure", LatticeType::SimpleCubic),
            ControlSpec::range(
                WAVELENGTH_NM,
                "X-ray wavelength",
                "nm",
                (0.1, 0.2, 0.001),
                0.154,
            ),
            ControlSpec::range(
                LATTICE_CONSTANT_NM,
                "Lattice constant",
                "nm",
                (0.2, 0.6, 0.01),
                0.3,
            ),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("h", 0.5),
                Column::key("k", 0.5),
                Column::key("l", 0.5),
                Column::value("d-spacing (nm)").with_format(NumberFormat::Fixed(4)),
                Column::key("2-theta (degrees)", 1e-9).with_format(NumberFormat::Fixed(2)),
                Column::value("Intensity").with_format(NumberFormat::Fixed(1)),
            ],
            TWO_THETA_COLUMN,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let (instrument, pattern) = self.pattern(controls)?;
        let mut readings = vec![Reading::quantity("Reflections", pattern.len() as f64, "")];
        let true_constant = controls.number(LATTICE_CONSTANT_NM)?;
        if let Some(estimate) = instrument.back_calculate(&pattern, true_constant) {
            readings.push(Reading::text("Indexed from", estimate.from.to_string()));
            readings.push(Reading::quantity(
                "Calculated lattice constant",
                estimate.lattice_constant_nm,
                "nm",
            ));
            readings.push(Reading::quantity("Deviation", estimate.deviation_nm, "nm"));
            readings.push(Reading::quantity("Deviation", estimate.deviation_pct, "%"));
        }
        Ok(readings)
    }

    fn curve(&self, controls: &ControlState) -> LabResult<Option<Vec<MeasurementPoint>>> {
        let (_, pattern) = self.pattern(controls)?;
        Ok(Some(pattern.iter().map(point).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(model: &XrayDiffraction) -> ControlState {
        ControlState::new("xray-diffraction", model.controls())
    }

    #[test]
    fn single_readings_record_nothing() {
        let model = XrayDiffraction::new(&LabConfig::default());
        assert!(model.measure(&panel(&model)).unwrap().is_empty());
    }

    #[test]
    fn simple_cubic_starts_with_100_family() {
        let model = XrayDiffraction::new(&LabConfig::default());
        let curve = model.curve(&panel(&model)).unwrap().unwrap();
        let first: f64 = curve[0].fields[..3].iter().sum();
        assert_eq!(first, 1.0);
        let angles: Vec<f64> = curve.iter().map(|p| p.fields[TWO_THETA_COLUMN]).collect();
        assert!(angles.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn back_calculation_is_close() {
        let model = XrayDiffraction::new(&LabConfig::default());
        let readings = model.readout(&panel(&model)).unwrap();
        let deviation_nm = readings[3].number().unwrap();
        assert!(deviation_nm < 1e-3);
    }
}
