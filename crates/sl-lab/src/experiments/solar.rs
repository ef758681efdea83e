//! Solar cell operating point and I-V curve.

use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::solar::{CURVE_POINTS, IvSample, SolarOperatingPoint, operating_point};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};
use sl_sweep::SweepDefinition;

pub const EFFICIENCY: &str = "efficiency";
pub const IRRADIANCE: &str = "irradiance";
pub const TEMPERATURE_C: &str = "temperature_c";
pub const LOAD_OHM: &str = "load_ohm";

fn point(s: IvSample) -> MeasurementPoint {
    MeasurementPoint::new(vec![s.voltage_v, s.current_a, s.power_w])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SolarCell;

impl SolarCell {
    fn evaluate(&self, controls: &ControlState) -> LabResult<Option<SolarOperatingPoint>> {
        Ok(operating_point(
            controls.number(EFFICIENCY)?,
            controls.number(IRRADIANCE)?,
            controls.number(TEMPERATURE_C)?,
            controls.number(LOAD_OHM)?,
        ))
    }
}

impl ExperimentModel for SolarCell {
    fn id(&self) -> ExperimentId {
        ExperimentId::SolarCell
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::range(EFFICIENCY, "Efficiency", "", (0.05, 0.3, 0.01), 0.15),
            ControlSpec::range(IRRADIANCE, "Irradiance", "kW/m²", (0.1, 1.0, 0.05), 0.8),
            ControlSpec::range(
                TEMPERATURE_C,
                "Cell temperature",
                "°C",
                (15.0, 60.0, 1.0),
                25.0,
            ),
            ControlSpec::range(LOAD_OHM, "Load resistance", "Ω", (1.0, 50.0, 1.0), 10.0),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Voltage (V)", 1e-6).with_format(NumberFormat::Fixed(2)),
                Column::value("Current (A)").with_format(NumberFormat::Fixed(3)),
                Column::value("Power (W)").with_format(NumberFormat::Fixed(2)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let Some(op) = self.evaluate(controls)? else {
            return Ok(Vec::new());
        };
        Ok(vec![
            Reading::quantity("Power output", op.power_w, "W"),
            Reading::quantity("Voltage", op.voltage_v, "V"),
            Reading::quantity("Current", op.current_a, "A"),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        let operating = self.evaluate(controls)?.and_then(|op| op.iv_sample(op.voltage_v));
        Ok(operating.map(point).into_iter().collect())
    }

    /// [`CURVE_POINTS`] samples from short circuit to `1.5 · Vop`.
    fn curve(&self, controls: &ControlState) -> LabResult<Option<Vec<MeasurementPoint>>> {
        let Some(op) = self.evaluate(controls)? else {
            return Ok(Some(Vec::new()));
        };
        let voltages = SweepDefinition::linear(0.0, op.curve_max_voltage(), CURVE_POINTS)?;
        let points = voltages
            .generate_points()
            .into_iter()
            .filter_map(|v| op.iv_sample(v))
            .map(point)
            .collect();
        Ok(Some(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_operating_point() {
        let controls = ControlState::new("solar", SolarCell.controls());
        let readings = SolarCell.readout(&controls).unwrap();
        // 120 W * 0.15 * 0.8
        assert!((readings[0].number().unwrap() - 14.4).abs() < 1e-9);
        assert!((readings[1].number().unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn curve_has_fixed_sample_count() {
        let controls = ControlState::new("solar", SolarCell.controls());
        let curve = SolarCell.curve(&controls).unwrap().unwrap();
        // the roll-off stays positive up to 1.5 Vop, so nothing is dropped
        assert_eq!(curve.len(), CURVE_POINTS);
        assert_eq!(curve[0].fields[0], 0.0);
        assert_eq!(curve[CURVE_POINTS - 1].fields[0], 18.0);
        // 0.9 V apart
        assert!((curve[1].fields[0] - 0.9).abs() < 1e-12);
    }
}
