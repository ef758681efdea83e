//! Experiment catalog and the model trait each experiment implements.

use crate::config::LabConfig;
use crate::controls::{ControlSpec, ControlState};
use crate::experiments;
use crate::LabResult;
use sl_core::Catalog;
use sl_series::{MeasurementPoint, Series, SeriesLayout, SeriesResult, UpsertOutcome};
use sl_sweep::SweepPlan;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExperimentId {
    HallCoefficient,
    BandGap,
    FourProbe,
    LdrCharacteristics,
    SolarCell,
    PnJunction,
    Photocell,
    CarrierMobility,
    OpticalFiber,
    DiodeIv,
    XrayDiffraction,
}

impl ExperimentId {
    /// Stem of the exported CSV file.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::HallCoefficient => "hall_effect",
            Self::BandGap => "band_gap",
            Self::FourProbe => "four_probe",
            Self::LdrCharacteristics => "ldr",
            Self::SolarCell => "solar_cell",
            Self::PnJunction => "pn_junction",
            Self::Photocell => "photocell",
            Self::CarrierMobility => "carrier_mobility",
            Self::OpticalFiber => "optical_fiber",
            Self::DiodeIv => "diode_iv",
            Self::XrayDiffraction => "xray_diffraction",
        }
    }

    /// `<stem>_data.csv`
    pub fn export_filename(self) -> String {
        format!("{}_data.csv", self.file_stem())
    }

    pub fn model(self, config: &LabConfig) -> Box<dyn ExperimentModel> {
        match self {
            Self::HallCoefficient => Box::new(experiments::hall::HallEffect),
            Self::BandGap => Box::new(experiments::band_gap::BandGap::new(config)),
            Self::FourProbe => Box::new(experiments::four_probe::FourProbe::new(config)),
            Self::LdrCharacteristics => Box::new(experiments::ldr::LdrCharacteristics::new(config)),
            Self::SolarCell => Box::new(experiments::solar::SolarCell),
            Self::PnJunction => Box::new(experiments::pn_junction::PnJunction),
            Self::Photocell => Box::new(experiments::photocell::Photocell),
            Self::CarrierMobility => Box::new(experiments::mobility::CarrierMobility),
            Self::OpticalFiber => Box::new(experiments::fiber::OpticalFiber),
            Self::DiodeIv => Box::new(experiments::diode::DiodeIv),
            Self::XrayDiffraction => Box::new(experiments::xrd::XrayDiffraction::new(config)),
        }
    }
}

impl Catalog for ExperimentId {
    const KIND: &'static str = "experiment";
    const ALL: &'static [Self] = &[
        Self::HallCoefficient,
        Self::BandGap,
        Self::FourProbe,
        Self::LdrCharacteristics,
        Self::SolarCell,
        Self::PnJunction,
        Self::Photocell,
        Self::CarrierMobility,
        Self::OpticalFiber,
        Self::DiodeIv,
        Self::XrayDiffraction,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::HallCoefficient => "hall-coefficient",
            Self::BandGap => "band-gap",
            Self::FourProbe => "four-probe",
            Self::LdrCharacteristics => "ldr-characteristics",
            Self::SolarCell => "solar-cell",
            Self::PnJunction => "pn-junction",
            Self::Photocell => "photocell",
            Self::CarrierMobility => "carrier-mobility",
            Self::OpticalFiber => "optical-fiber",
            Self::DiodeIv => "diode-iv",
            Self::XrayDiffraction => "xray-diffraction",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::HallCoefficient => "Determination of Hall Coefficient",
            Self::BandGap => "Band Gap Determination",
            Self::FourProbe => "Four-Probe Method",
            Self::LdrCharacteristics => "V-I Characteristics of LDR",
            Self::SolarCell => "Solar Cell Characteristics",
            Self::PnJunction => "PN Junction Diode Characteristics",
            Self::Photocell => "Photocell Characteristics",
            Self::CarrierMobility => "Electron and Hole Mobility",
            Self::OpticalFiber => "Optical Fiber Attenuation",
            Self::DiodeIv => "Diode I-V Characteristics",
            Self::XrayDiffraction => "X-Ray Diffraction",
        }
    }
}

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadingValue {
    Quantity { value: f64, unit: &'static str },
    Text(String),
}

/// One line of an experiment's live display.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub label: &'static str,
    pub value: ReadingValue,
}

impl Reading {
    pub fn quantity(label: &'static str, value: f64, unit: &'static str) -> Self {
        Self {
            label,
            value: ReadingValue::Quantity { value, unit },
        }
    }

    pub fn text(label: &'static str, text: impl Into<String>) -> Self {
        Self {
            label,
            value: ReadingValue::Text(text.into()),
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self.value {
            ReadingValue::Quantity { value, .. } => Some(value),
            ReadingValue::Text(_) => None,
        }
    }

    /// Value without label or unit.
    pub fn value_string(&self) -> String {
        match &self.value {
            ReadingValue::Quantity { value, .. } => format!("{value}"),
            ReadingValue::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ReadingValue::Quantity { value, unit } if unit.is_empty() => {
                write!(f, "{}: {}", self.label, value)
            }
            ReadingValue::Quantity { value, unit } => {
                write!(f, "{}: {} {}", self.label, value, unit)
            }
            ReadingValue::Text(text) => write!(f, "{}: {}", self.label, text),
        }
    }
}

/// Second table kept next to the main series. Every recorded point is
/// projected onto `sources` (main-series column indices) and upserted here
/// under the companion's own keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Companion {
    /// Export file stem suffix, `<stem>_<name>_data.csv`
    pub name: &'static str,
    sources: Vec<usize>,
    series: Series,
}

impl Companion {
    pub fn new(name: &'static str, layout: SeriesLayout, sources: Vec<usize>) -> Self {
        Self {
            name,
            sources,
            series: Series::new(layout),
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Selected fields of a main-series point. Out-of-range sources are
    /// dropped, which the upsert then rejects as a layout mismatch.
    pub fn project(&self, point: &MeasurementPoint) -> MeasurementPoint {
        let fields = self
            .sources
            .iter()
            .filter_map(|&i| point.fields.get(i).copied())
            .collect();
        MeasurementPoint::new(fields)
    }

    pub fn record(&mut self, point: &MeasurementPoint) -> SeriesResult<UpsertOutcome> {
        let projected = self.project(point);
        self.series.upsert(projected)
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }
}

/// One experiment: its controls, its formula and how its results are
/// laid out.
pub trait ExperimentModel: fmt::Debug {
    fn id(&self) -> ExperimentId;

    fn controls(&self) -> Vec<ControlSpec>;

    fn layout(&self) -> LabResult<SeriesLayout>;

    /// Live values for the current control settings.
    fn readout(&self, controls: &ControlState) -> LabResult<Vec<Reading>>;

    /// Points to record for the current settings. Empty when the settings
    /// are out of the formula's domain.
    fn measure(&self, _controls: &ControlState) -> LabResult<Vec<MeasurementPoint>> {
        Ok(Vec::new())
    }

    /// Full generated curve replacing the series, if the experiment has one.
    fn curve(&self, _controls: &ControlState) -> LabResult<Option<Vec<MeasurementPoint>>> {
        Ok(None)
    }

    /// Re-derive dependent control bounds after a control changed.
    fn adjust_controls(&self, _controls: &mut ControlState) -> LabResult<()> {
        Ok(())
    }

    /// Timed sweep, if the experiment has one.
    fn sweep_plan(&self, _controls: &ControlState) -> LabResult<Option<SweepPlan>> {
        Ok(None)
    }

    /// Table fed alongside the main series, if the experiment keeps one.
    fn companion(&self) -> LabResult<Option<Companion>> {
        Ok(None)
    }

    /// Results derived from the whole series, exported after the data rows.
    fn summary(&self, _series: &Series, _controls: &ControlState) -> LabResult<Vec<Reading>> {
        Ok(Vec::new())
    }
}
