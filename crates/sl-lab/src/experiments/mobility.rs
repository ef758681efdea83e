//! Carrier mobility against temperature with switchable scattering terms.

use super::names::{MATERIAL, TEMPERATURE_K};
use crate::controls::{ControlSpec, ControlState};
use crate::experiment::{ExperimentId, ExperimentModel, Reading};
use crate::LabResult;
use sl_physics::Semiconductor;
use sl_physics::mobility::{ScatteringMechanisms, carrier_mobility};
use sl_series::{Column, MeasurementPoint, NumberFormat, SeriesLayout};
use sl_sweep::SweepDefinition;

pub const DOPING: &str = "doping_per_cm3";
pub const PHONON: &str = "phonon";
pub const IMPURITY: &str = "impurity";
pub const CARRIER_CARRIER: &str = "carrier_carrier";

const CURVE_FROM_K: f64 = 100.0;
const CURVE_TO_K: f64 = 500.0;
const CURVE_STEP_K: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct CarrierMobility;

struct Inputs {
    material: Semiconductor,
    doping: f64,
    mechanisms: ScatteringMechanisms,
}

impl CarrierMobility {
    fn inputs(&self, controls: &ControlState) -> LabResult<Inputs> {
        Ok(Inputs {
            material: controls.choice::<Semiconductor>(MATERIAL)?,
            doping: controls.number(DOPING)?,
            mechanisms: ScatteringMechanisms {
                phonon: controls.toggle(PHONON)?,
                impurity: controls.toggle(IMPURITY)?,
                carrier_carrier: controls.toggle(CARRIER_CARRIER)?,
            },
        })
    }
}

impl Inputs {
    fn point(&self, temperature_k: f64) -> Option<MeasurementPoint> {
        carrier_mobility(self.material, temperature_k, self.doping, self.mechanisms)
            .map(|mu| MeasurementPoint::new(vec![temperature_k, mu]))
    }
}

impl ExperimentModel for CarrierMobility {
    fn id(&self) -> ExperimentId {
        ExperimentId::CarrierMobility
    }

    fn controls(&self) -> Vec<ControlSpec> {
        let defaults = ScatteringMechanisms::default();
        vec![
            ControlSpec::choice(MATERIAL, "Material", Semiconductor::Silicon),
            ControlSpec::range(
                TEMPERATURE_K,
                "Temperature",
                "K",
                (CURVE_FROM_K, CURVE_TO_K, 5.0),
                300.0,
            ),
            ControlSpec::range(
                DOPING,
                "Doping concentration",
                "cm⁻³",
                (1e14, 1e19, 1e14),
                1e16,
            ),
            ControlSpec::toggle(PHONON, "Lattice (phonon) scattering", defaults.phonon),
            ControlSpec::toggle(IMPURITY, "Ionized impurity scattering", defaults.impurity),
            ControlSpec::toggle(
                CARRIER_CARRIER,
                "Carrier-carrier scattering",
                defaults.carrier_carrier,
            ),
        ]
    }

    fn layout(&self) -> LabResult<SeriesLayout> {
        Ok(SeriesLayout::new(
            vec![
                Column::key("Temperature (K)", 1.0),
                Column::value("Mobility (cm²/V·s)").with_format(NumberFormat::Fixed(0)),
            ],
            0,
        )?)
    }

    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>> {
        let inputs = self.inputs(controls)?;
        let Some(point) = inputs.point(controls.number(TEMPERATURE_K)?) else {
            return Ok(Vec::new());
        };
        let profile = inputs.material.profile();
        Ok(vec![
            Reading::quantity("Mobility", point.fields[1], "cm²/V·s"),
            Reading::quantity(
                "Lattice mobility at 300 K",
                profile.base_mobility_cm2_per_vs,
                "cm²/V·s",
            ),
            Reading::quantity("Effective mass", profile.effective_mass_ratio, "m0"),
        ])
    }

    fn measure(&self, controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        let inputs = self.inputs(controls)?;
        let temperature = controls.number(TEMPERATURE_K)?;
        Ok(inputs.point(temperature).into_iter().collect())
    }

    fn curve(&self, controls: &ControlState) -> LabResult<Option<Vec<MeasurementPoint>>> {
        let inputs = self.inputs(controls)?;
        let grid = SweepDefinition::stepped(CURVE_FROM_K, CURVE_TO_K, CURVE_STEP_K)?;
        Ok(Some(
            grid.generate_points()
                .into_iter()
                .filter_map(|t| inputs.point(t))
                .collect(),
        ))
    }
}
