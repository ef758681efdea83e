//! Band gap from resistance against temperature.
//!
//! A timed sweep raises the temperature in 20 K steps up to the material's
//! limit; the recorded series is fitted as `ln R` against `1/T`.

use super::names::{MATERIAL, TEMPERATURE_K};
use crate::config::LabConfig;
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::band_gap::resistance;
use sl_physics::{Semiconductor, fit_band_gap};
use sl_series::{Column, MeasurementPoint, NumberFormat, Series, SeriesLayout};
use sl_sweep::SweepPlan;
use std::time::Duration;

pub const SWEEP_STEP_K: f64 = 20.0;

const COL_INVERSE_T: usize = 2;
const COL_LN_R: usize = 3;

#[derive(Debug, Clone)]
pub struct BandGap {
    interval: Duration,
}

impl BandGap {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            interval: config.sweeps.band_gap_interval(),
        }
    }
}

impl ExperimentModel for BandGap {
    fn id(&self) -> ExperimentId {
        ExperimentId::BandGap
    }

    fn controls(&self) -> Vec<ControlSpec> {
        let (lo, hi) = Semiconductor::Silicon.profile().temperature_range_k;
        vec![
            ControlSpec::choice(MATERIAL, "Material", Semiconductor::Silicon),
            ControlSpec::range(TEMPERATURE_K, "Temperature", "K", (lo, hi, 5.0), 300.0),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Temperature (K)", 1.0),
                Column::value("Resistance (Ohm)"),
                Column::value("1/T (K^-1)").with_format(NumberFormat::Exponential(4)),
                Column::value("ln(R)").with_format(NumberFormat::Fixed(4)),
            ],
            0,
        )?)
    }

    fn adjust_controls(&self, controls: &mut ControlState) -> LabResult<()> {
        let (lo, hi) = controls
            .choice::<Semiconductor>(MATERIAL)?
            .profile()
            .temperature_range_k;
        controls.set_range(TEMPERATURE_K, lo, hi)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let material = controls.choice::<Semiconductor>(MATERIAL)?;
        let Some(reading) = resistance(material, controls.number(TEMPERATURE_K)?) else {
            return Ok(Vec::new());
        };
        Ok(vec![
            Reading::quantity("Resistance", reading.resistance_ohm, "Ohm"),
            Reading::quantity("1/T", reading.inverse_temperature, "K^-1"),
            Reading::quantity("ln(R)", reading.ln_resistance, ""),
            Reading::quantity("Reference band gap", material.profile().band_gap_ev, "eV"),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        let material = controls.choice::<Semiconductor>(MATERIAL)?;
        Ok(resistance(material, controls.number(TEMPERATURE_K)?)
            .map(|r| {
                MeasurementPoint::new(vec![
                    r.temperature_k,
                    r.resistance_ohm,
                    r.inverse_temperature,
                    r.ln_resistance,
                ])
            })
            .into_iter()
            .collect())
    }

    fn sweep_plan(&self, controls: &ControlState) -> LabResult<Option<SweepPlan>> {
        let (_, max) = controls
            .choice::<Semiconductor>(MATERIAL)?
            .profile()
            .temperature_range_k;
        let plan = SweepPlan::new(TEMPERATURE_K, SWEEP_STEP_K, max, self.interval)?;
        Ok(Some(plan))
    }

    /// Band gap from the Arrhenius fit once two points are recorded, and
    /// its deviation from the selected material's reference gap.
    fn summary(&self, series: &Series, controls: &ControlState) -> LabResult<Vec<Reading>> {
        if series.len() < 2 {
            return Ok(Vec::new());
        }
        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|p| (p.fields[COL_INVERSE_T], p.fields[COL_LN_R]))
            .collect();
        let fit = fit_band_gap(&points)?;
        let reference = controls.choice::<Semiconductor>(MATERIAL)?.profile().band_gap_ev;
        let deviation_pct = (fit.band_gap_ev / reference - 1.0).abs() * 100.0;
        Ok(vec![
            Reading::quantity("Calculated Band Gap (eV)", fit.band_gap_ev, "eV"),
            Reading::quantity("Deviation (%)", deviation_pct, "%"),
        ])
    }
}
