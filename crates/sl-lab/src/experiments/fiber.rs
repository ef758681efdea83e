//! Optical fiber transmission loss.

use super::names::WAVELENGTH_NM;
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::AttenuationModel;
use sl_physics::fiber::{FiberReading, fiber_transmission};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};
use sl_sweep::SweepDefinition;

pub const MODEL: &str = "attenuation_model";
pub const LENGTH_KM: &str = "length_km";
pub const INPUT_POWER_MW: &str = "input_power_mw";
pub const ATTENUATION: &str = "attenuation_db_per_km";

const CURVE_FROM_NM: f64 = 800.0;
const CURVE_TO_NM: f64 = 1600.0;
const CURVE_STEP_NM: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct OpticalFiber;

struct Link {
    model: AttenuationModel,
    length_km: f64,
    input_power_mw: f64,
    fixed_db_per_km: f64,
}

impl Link {
    fn from_controls(controls: &ControlState) -> LabResult<Self> {
        Ok(Self {
            model: controls.choice::<AttenuationModel>(MODEL)?,
            length_km: controls.number(LENGTH_KM)?,
            input_power_mw: controls.number(INPUT_POWER_MW)?,
            fixed_db_per_km: controls.number(ATTENUATION)?,
        })
    }

    fn at(&self, wavelength_nm: f64) -> Option<FiberReading> {
        fiber_transmission(
            self.model,
            wavelength_nm,
            self.length_km,
            self.input_power_mw,
            self.fixed_db_per_km,
        )
    }
}

fn point(r: FiberReading) -> MeasurementPoint {
    MeasurementPoint::new(vec![
        r.wavelength_nm,
        r.input_power_mw,
        r.output_power_mw,
        r.attenuation_db_per_km,
        r.length_km,
    ])
}

impl ExperimentModel for OpticalFiber {
    fn id(&self) -> ExperimentId {
        ExperimentId::OpticalFiber
    }

    fn controls(&self) -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(MODEL, "Attenuation model", AttenuationModel::Fixed),
            ControlSpec::range(
                WAVELENGTH_NM,
                "Wavelength",
                "nm",
                (400.0, 1600.0, 10.0),
                650.0,
            ),
            ControlSpec::range(LENGTH_KM, "Fiber length", "km", (0.1, 10.0, 0.1), 1.0),
            ControlSpec::range(INPUT_POWER_MW, "Input power", "mW", (1.0, 20.0, 0.5), 5.0),
            ControlSpec::range(
                ATTENUATION,
                "Attenuation coefficient",
                "dB/km",
                (0.1, 2.0, 0.05),
                0.3,
            ),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Wavelength (nm)", 5.0),
                Column::value("Input Power (mW)").with_format(NumberFormat::Fixed(1)),
                Column::value("Output Power (mW)").with_format(NumberFormat::Fixed(3)),
                Column::value("Attenuation (dB/km)").with_format(NumberFormat::Fixed(3)),
                Column::key("Fiber Length (km)", 0.1).with_format(NumberFormat::Fixed(1)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let link = Link::from_controls(controls)?;
        let Some(r) = link.at(controls.number(WAVELENGTH_NM)?) else {
            return Ok(Vec::new());
        };
        Ok(vec![
            Reading::quantity("Output power", r.output_power_mw, "mW"),
            Reading::quantity("Total loss", r.loss_db, "dB"),
            Reading::quantity("Attenuation", r.attenuation_db_per_km, "dB/km"),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        let link = Link::from_controls(controls)?;
        let wavelength = controls.number(WAVELENGTH_NM)?;
        Ok(link.at(wavelength).map(point).into_iter().collect())
    }

    /// Near-infrared transmission window with the selected attenuation model.
    fn curve(&self, controls: &ControlState) -> LabResult<Option<Vec<MeasurementPoint>>> {
        let link = Link::from_controls(controls)?;
        let grid = SweepDefinition::stepped(CURVE_FROM_NM, CURVE_TO_NM, CURVE_STEP_NM)?;
        Ok(Some(
            grid.generate_points()
                .into_iter()
                .filter_map(|wl| link.at(wl))
                .map(point)
                .collect(),
        ))
    }
}
