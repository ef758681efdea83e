//! Light-dependent resistor: current against bias at fixed illumination,
//! with resistance against illumination kept as a companion table.

use super::names::{INTENSITY_PCT, MATERIAL, VOLTAGE_V};
use crate::config::LabConfig;
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{Companion, ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::LdrMaterial;
use sl_physics::ldr::{LdrReading, ldr_reading};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};
use sl_sweep::SweepPlan;
use std::time::Duration;

pub const SWEEP_STEP_V: f64 = 0.5;
pub const MAX_VOLTAGE_V: f64 = 10.0;

const RESISTANCE_COLUMN: usize = 2;
/// Column holding the illumination, for filtering a series by intensity.
pub const INTENSITY_COLUMN: usize = 3;

#[derive(Debug, Clone)]
pub struct LdrCharacteristics {
    interval: Duration,
}

impl LdrCharacteristics {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            interval: config.sweeps.ldr_interval(),
        }
    }

    fn evaluate(&self, controls: &ControlState) -> LabResult<Option<LdrReading>> {
        Ok(ldr_reading(
            controls.choice::<LdrMaterial>(MATERIAL)?,
            controls.number(VOLTAGE_V)?,
            controls.number(INTENSITY_PCT)?,
        ))
    }
}

impl ExperimentModel for LdrCharacteristics {
    fn id(&self) -> ExperimentId {
        ExperimentId::LdrCharacteristics
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(MATERIAL, "LDR material", LdrMaterial::CadmiumSulfide),
            ControlSpec::range(
                INTENSITY_PCT,
                "Light intensity",
                "%",
                (0.0, 100.0, 1.0),
                50.0,
            ),
            ControlSpec::range(VOLTAGE_V, "Voltage", "V", (0.0, MAX_VOLTAGE_V, 0.1), 5.0),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Voltage (V)", 0.1).with_format(NumberFormat::Fixed(1)),
                Column::value("Current (mA)").with_format(NumberFormat::Fixed(3)),
                Column::value("Resistance (kΩ)").with_format(NumberFormat::Fixed(2)),
                Column::key("Light Intensity (%)", 1.0),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let material = controls.choice::<LdrMaterial>(MATERIAL)?;
        let mut readings = match self.evaluate(controls)? {
            Some(r) => vec![
                Reading::quantity("Resistance", r.resistance_kohm, "kΩ"),
                Reading::quantity("Current", r.current_ma, "mA"),
            ],
            None => vec![Reading::text("Resistance", "open circuit (dark)")],
        };
        readings.extend([
            Reading::quantity("Peak sensitivity", material.peak_sensitivity_nm(), "nm"),
            Reading::quantity("Response time", material.response_time_ms(), "ms"),
        ]);
        Ok(readings)
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        Ok(self
            .evaluate(controls)?
            .map(|r| {
                MeasurementPoint::new(vec![
                    r.voltage_v,
                    r.current_ma,
                    r.resistance_kohm,
                    r.illumination_pct,
                ])
            })
            .into_iter()
            .collect())
    }

    fn sweep_plan(&self, _controls: &ControlState) -> LabResult<Option<SweepPlan>> {
        let plan = SweepPlan::new(VOLTAGE_V, SWEEP_STEP_V, MAX_VOLTAGE_V, self.interval)?;
        Ok(Some(plan))
    }

    /// Resistance against illumination, one point per intensity.
    fn companion(&self) -> LabResult<Option<Companion>> {
        let layout = SeriesLayout::new(
            vec![
                Column::key("Light Intensity (%)", 1.0),
                Column::value("Resistance (kΩ)").with_format(NumberFormat::Fixed(2)),
            ],
            0,
        )?;
        let sources = vec![INTENSITY_COLUMN, RESISTANCE_COLUMN];
        Ok(Some(Companion::new("resistance", layout, sources)))
    }
}
