//! Four-probe resistivity with seeded measurement noise.

use super::names::{CURRENT_MA, MATERIAL, THICKNESS_MM};
use crate::config::LabConfig;
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::four_probe::{FourProbeReading, four_probe};
use sl_physics::{SeededNoise, Semiconductor};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};

pub const SPACING_MM: &str = "spacing_mm";

fn point(r: FourProbeReading) -> MeasurementPoint {
    MeasurementPoint::new(vec![r.current_ma, r.voltage_v, r.resistivity_ohm_cm])
}

#[derive(Debug, Clone)]
pub struct FourProbe {
    noise: SeededNoise,
}

impl FourProbe {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            noise: SeededNoise::new(config.noise_seed),
        }
    }

    fn evaluate(&self, controls: &ControlState) -> LabResult<Option<FourProbeReading>> {
        Ok(four_probe(
            controls.choice::<Semiconductor>(MATERIAL)?,
            controls.number(CURRENT_MA)?,
            controls.number(SPACING_MM)?,
            controls.number(THICKNESS_MM)?,
            &self.noise,
        ))
    }
}

impl ExperimentModel for FourProbe {
    fn id(&self) -> ExperimentId {
        ExperimentId::FourProbe
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(MATERIAL, "Material", Semiconductor::Silicon),
            ControlSpec::range(CURRENT_MA, "Current", "mA", (0.1, 10.0, 0.1), 1.0),
            ControlSpec::range(SPACING_MM, "Probe spacing", "mm", (0.5, 10.0, 0.5), 2.0),
            ControlSpec::range(THICKNESS_MM, "Sample thickness", "mm", (0.1, 5.0, 0.1), 0.5),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Current (mA)", 0.01),
                Column::value("Voltage (V)").with_format(NumberFormat::Fixed(4)),
                Column::value("Resistivity (Ω·cm)").with_format(NumberFormat::Fixed(2)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let Some(reading) = self.evaluate(controls)? else {
            return Ok(Vec::new());
        };
        let material = controls.choice::<Semiconductor>(MATERIAL)?;
        Ok(vec![
            Reading::quantity("Probe voltage", reading.voltage_v, "V"),
            Reading::quantity("Measured resistivity", reading.resistivity_ohm_cm, "Ω·cm"),
            Reading::quantity(
                "Reference resistivity",
                material.profile().resistivity_ohm_cm,
                "Ω·cm",
            ),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        Ok(self.evaluate(controls)?.map(point).into_iter().collect())
    }
}
