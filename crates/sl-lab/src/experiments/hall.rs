//! Hall coefficient: Hall voltage against magnetic field.

use super::names::{CURRENT_MA, MATERIAL, THICKNESS_MM};
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_core::{milliamps, mm, tesla};
use sl_physics::Semiconductor;
use sl_physics::hall::{HallReading, hall_voltage};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};

pub const FIELD_T: &str = "field_t";

#[derive(Debug, Clone, Copy, Default)]
pub struct HallEffect;

impl HallEffect {
    fn evaluate(&self, controls: &ControlState) -> LabResult<Option<HallReading>> {
        Ok(hall_voltage(
            controls.choice::<Semiconductor>(MATERIAL)?,
            milliamps(controls.number(CURRENT_MA)?),
            tesla(controls.number(FIELD_T)?),
            mm(controls.number(THICKNESS_MM)?),
        ))
    }
}

impl ExperimentModel for HallEffect {
    fn id(&self) -> ExperimentId {
        ExperimentId::HallCoefficient
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(MATERIAL, "Material", Semiconductor::Silicon),
            ControlSpec::range(CURRENT_MA, "Current", "mA", (1.0, 50.0, 1.0), 10.0),
            ControlSpec::range(FIELD_T, "Magnetic field", "T", (0.0, 2.0, 0.05), 0.5),
            ControlSpec::range(THICKNESS_MM, "Sample thickness", "mm", (0.1, 5.0, 0.1), 1.0),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Magnetic Field (T)", 1e-6),
                Column::value("Hall Voltage (mV)").with_format(NumberFormat::Fixed(4)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let Some(reading) = self.evaluate(controls)? else {
            return Ok(Vec::new());
        };
        Ok(vec![
            Reading::quantity("Hall voltage", reading.hall_voltage_mv(), "mV"),
            // m³/C -> cm³/C
            Reading::quantity(
                "Hall coefficient",
                reading.hall_coefficient_m3_per_c * 1e6,
                "cm³/C",
            ),
            Reading::text("Carrier type", reading.carrier_type.label()),
            Reading::quantity(
                "Carrier density",
                reading.carrier_density_per_m3 * 1e-6,
                "cm⁻³",
            ),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        let field = controls.number(FIELD_T)?;
        Ok(self
            .evaluate(controls)?
            .map(|r| MeasurementPoint::new(vec![field, r.hall_voltage_mv()]))
            .into_iter()
            .collect())
    }
}
