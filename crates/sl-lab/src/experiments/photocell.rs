//! Photocell current against wavelength and intensity.

use super::names::{INTENSITY_PCT, MATERIAL, WAVELENGTH_NM};
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::Semiconductor;
use sl_physics::photocell::{PhotocellReading, photocurrent};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};

pub const BIAS_V: &str = "bias_v";

#[derive(Debug, Clone, Copy, Default)]
pub struct Photocell;

impl Photocell {
    fn evaluate(&self, controls: &ControlState) -> LabResult<PhotocellReading> {
        Ok(photocurrent(
            controls.choice::<Semiconductor>(MATERIAL)?,
            controls.number(WAVELENGTH_NM)?,
            controls.number(INTENSITY_PCT)?,
            controls.number(BIAS_V)?,
        ))
    }
}

impl ExperimentModel for Photocell {
    fn id(&self) -> ExperimentId {
        ExperimentId::Photocell
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(MATERIAL, "Material", Semiconductor::Silicon),
            ControlSpec::range(
                WAVELENGTH_NM,
                "Wavelength",
                "nm",
                (380.0, 1000.0, 10.0),
                550.0,
            ),
            ControlSpec::range(
                INTENSITY_PCT,
                "Light intensity",
                "%",
                (0.0, 100.0, 1.0),
                50.0,
            ),
            ControlSpec::range(BIAS_V, "Bias voltage", "V", (0.0, 10.0, 0.1), 5.0),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Wavelength (nm)", 5.0),
                Column::key("Intensity (%)", 1.0),
                Column::value("Current (μA)").with_format(NumberFormat::Fixed(2)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let r = self.evaluate(controls)?;
        let photo = controls.choice::<Semiconductor>(MATERIAL)?.profile().photo;
        Ok(vec![
            Reading::quantity("Photocurrent", r.current_ua, "μA"),
            Reading::quantity("Relative response", r.response, ""),
            Reading::quantity("Peak wavelength", photo.peak_wavelength_nm, "nm"),
            Reading::quantity("Cutoff wavelength", photo.cutoff_wavelength_nm, "nm"),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        let r = self.evaluate(controls)?;
        Ok(vec![MeasurementPoint::new(vec![
            r.wavelength_nm,
            r.intensity_pct,
            r.current_ua,
        ])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_light_no_current() {
        let mut controls = ControlState::new("photocell", Photocell.controls());
        controls.set_number(INTENSITY_PCT, 0.0).unwrap();
        let points = Photocell.measure(&controls).unwrap();
        assert_eq!(points[0].fields, vec![550.0, 0.0, 0.0]);
    }

    #[test]
    fn gallium_arsenide_is_blind_past_cutoff() {
        let mut controls = ControlState::new("photocell", Photocell.controls());
        controls.set_choice(MATERIAL, "gallium_arsenide").unwrap();
        controls.set_number(WAVELENGTH_NM, 950.0).unwrap();
        assert_eq!(Photocell.measure(&controls).unwrap()[0].fields[2], 0.0);
    }
}
