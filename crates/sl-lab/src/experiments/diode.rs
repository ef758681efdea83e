//! Diode I-V characteristic.
//!
//! Zero bias has no static resistance, so that point is never recorded.

use super::names::{TEMPERATURE_K, VOLTAGE_V};
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::DiodeKind;
use sl_physics::diode::{DiodeReading, diode_iv};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};
use sl_sweep::SweepDefinition;

pub const DIODE: &str = "diode_type";
pub const IDEALITY: &str = "ideality";

const CURVE_FROM_V: f64 = -0.5;
const CURVE_TO_V: f64 = 1.0;
const CURVE_STEP_V: f64 = 0.025;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiodeIv;

struct Device {
    kind: DiodeKind,
    temperature_k: f64,
    ideality: f64,
}

impl Device {
    fn from_controls(controls: &ControlState) -> LabResult<Self> {
        Ok(Self {
            kind: controls.choice::<DiodeKind>(DIODE)?,
            temperature_k: controls.number(TEMPERATURE_K)?,
            ideality: controls.number(IDEALITY)?,
        })
    }

    fn at(&self, voltage_v: f64) -> Option<DiodeReading> {
        diode_iv(self.kind, voltage_v, self.temperature_k, self.ideality)
    }

    fn point(&self, voltage_v: f64) -> Option<MeasurementPoint> {
        let r = self.at(voltage_v)?;
        let resistance = r.resistance_ohm?;
        let fields = vec![r.voltage_v, r.current_a, resistance];
        Some(MeasurementPoint::new(fields))
    }
}

impl ExperimentModel for DiodeIv {
    fn id(&self) -> ExperimentId {
        ExperimentId::DiodeIv
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(DIODE, "Diode type", DiodeKind::Silicon),
            ControlSpec::range(
                VOLTAGE_V,
                "Voltage",
                "V",
                (CURVE_FROM_V, CURVE_TO_V, 0.01),
                0.5,
            ),
            ControlSpec::range(
                TEMPERATURE_K,
                "Temperature",
                "K",
                (250.0, 400.0, 5.0),
                300.0,
            ),
            ControlSpec::range(IDEALITY, "Ideality factor", "", (1.0, 2.0, 0.1), 1.5),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Voltage (V)", 0.005).with_format(NumberFormat::Fixed(3)),
                Column::value("Current (A)").with_format(NumberFormat::Exponential(6)),
                Column::value("Resistance (Ω)").with_format(NumberFormat::Exponential(4)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let device = Device::from_controls(controls)?;
        let Some(r) = device.at(controls.number(VOLTAGE_V)?) else {
            return Ok(Vec::new());
        };
        let resistance = match r.resistance_ohm {
            Some(ohm) => Reading::quantity("Static resistance", ohm, "Ω"),
            None => Reading::text("Static resistance", "undefined at zero bias"),
        };
        Ok(vec![
            Reading::quantity("Current", r.current_a, "A"),
            resistance,
            Reading::quantity(
                "Saturation current",
                sl_physics::diode::saturation_current_a(device.kind, device.temperature_k),
                "A",
            ),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        let device = Device::from_controls(controls)?;
        let voltage = controls.number(VOLTAGE_V)?;
        Ok(device.point(voltage).into_iter().collect())
    }

    fn curve(&self, controls: &ControlState) -> LabResult<Option<Vec<MeasurementPoint>>> {
        let device = Device::from_controls(controls)?;
        let grid = SweepDefinition::stepped(CURVE_FROM_V, CURVE_TO_V, CURVE_STEP_V)?;
        Ok(Some(
            grid.generate_points()
                .into_iter()
                .filter_map(|v| device.point(v))
                .collect(),
        ))
    }
}
