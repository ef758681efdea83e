//! PN junction I-V with a temperature-activated saturation current.

use super::names::{TEMPERATURE_K, VOLTAGE_V};
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::diode::{JunctionReading, pn_junction};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};
use sl_sweep::SweepDefinition;

const CURVE_FROM_V: f64 = -0.6;
const CURVE_TO_V: f64 = 0.8;
const CURVE_STEP_V: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct PnJunction;

fn point(r: JunctionReading) -> MeasurementPoint {
    let fields = vec![r.voltage_v, r.current_a, r.temperature_k, r.magnitude_a];
    MeasurementPoint::new(fields)
}

impl ExperimentModel for PnJunction {
    fn id(&self) -> ExperimentId {
        ExperimentId::PnJunction
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::range(
                VOLTAGE_V,
                "Bias voltage",
                "V",
                (CURVE_FROM_V, CURVE_TO_V, 0.01),
                0.0,
            ),
            ControlSpec::range(
                TEMPERATURE_K,
                "Temperature",
                "K",
                (250.0, 500.0, 5.0),
                300.0,
            ),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Voltage (V)", 0.05).with_format(NumberFormat::Fixed(2)),
                Column::value("Current (A)").with_format(NumberFormat::Exponential(4)),
                Column::key("Temperature (K)", 5.0),
                Column::value("|Current| (A)").with_format(NumberFormat::Exponential(4)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let Some(r) = pn_junction(controls.number(VOLTAGE_V)?, controls.number(TEMPERATURE_K)?)
        else {
            return Ok(Vec::new());
        };
        let bias = if r.voltage_v > 0.0 {
            "forward"
        } else if r.voltage_v < 0.0 {
            "reverse"
        } else {
            "zero"
        };
        Ok(vec![
            Reading::quantity("Current", r.current_a, "A"),
            Reading::text("Bias", bias),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        Ok(pn_junction(controls.number(VOLTAGE_V)?, controls.number(TEMPERATURE_K)?)
            .map(point)
            .into_iter()
            .collect())
    }

    /// Full bias range at the current temperature.
    fn curve(&self, controls: &ControlState) -> LabResult<Option<Vec<MeasurementPoint>>> {
        let temperature_k = controls.number(TEMPERATURE_K)?;
        let grid = SweepDefinition::stepped(CURVE_FROM_V, CURVE_TO_V, CURVE_STEP_V)?;
        Ok(Some(
            grid.generate_points()
                .into_iter()
                .filter_map(|v| pn_junction(v, temperature_k))
                .map(point)
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_spans_bias_range() {
        let controls = ControlState::new("pn-junction", PnJunction.controls());
        let curve = PnJunction.curve(&controls).unwrap().unwrap();
        assert_eq!(curve.len(), 15);
        assert_eq!(curve[0].fields[0], -0.6);
        assert_eq!(curve[14].fields[0], 0.8);
        assert!(curve.iter().all(|p| p.fields[2] == 300.0));
        assert!(curve[0].fields[1] < 0.0 && curve[14].fields[1] > 0.0);
    }

    #[test]
    fn zero_bias_reads_zero_current() {
        let controls = ControlState::new("pn-junction", PnJunction.controls());
        let readings = PnJunction.readout(&controls).unwrap();
        assert_eq!(readings[0].number(), Some(0.0));
        assert_eq!(readings[1].value_string(), "zero");
    }
}
