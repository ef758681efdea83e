//! Lab configuration file (YAML).
//!
//! ```yaml
//! noise_seed: 42
//! sweeps:
//!   band_gap_interval_ms: 1000
//!   ldr_interval_ms: 500
//! xray:
//!   angular_resolution_deg: 0.01
//! defaults:
//!   band-gap:
//!     material: germanium
//!     temperature_k: 250
//! ```

use crate::controls::ControlState;
use crate::experiment::{ExperimentId, ExperimentModel};
use crate::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use sl_core::Catalog;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Seed of the four-probe measurement noise
    pub noise_seed: u64,
    pub sweeps: SweepConfig,
    pub xray: XrayConfig,
    /// Control defaults per experiment id
    pub defaults: BTreeMap<String, BTreeMap<String, DefaultValue>>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            noise_seed: 0x5eed,
            sweeps: SweepConfig::default(),
            xray: XrayConfig::default(),
            defaults: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub band_gap_interval_ms: u64,
    pub ldr_interval_ms: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            band_gap_interval_ms: 1000,
            ldr_interval_ms: 500,
        }
    }
}

impl SweepConfig {
    pub fn band_gap_interval(&self) -> Duration {
        Duration::from_millis(self.band_gap_interval_ms)
    }

    pub fn ldr_interval(&self) -> Duration {
        Duration::from_millis(self.ldr_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrayConfig {
    pub angular_resolution_deg: f64,
}

impl Default for XrayConfig {
    fn default() -> Self {
        Self {
            angular_resolution_deg: 0.01,
        }
    }
}

/// A control default as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl LabConfig {
    pub fn load_yaml(path: &Path) -> LabResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LabConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_yaml(&self, path: &Path) -> LabResult<()> {
        self.validate()?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> LabResult<()> {
        if self.sweeps.band_gap_interval_ms == 0 || self.sweeps.ldr_interval_ms == 0 {
            return Err(LabError::Config {
                what: "sweep intervals must be positive".to_string(),
            });
        }
        let resolution = self.xray.angular_resolution_deg;
        if !(resolution.is_finite() && resolution >= 0.0) {
            return Err(LabError::Config {
                what: format!("angular resolution must be non-negative, got {resolution}"),
            });
        }
        for (experiment, values) in &self.defaults {
            let id = ExperimentId::from_id(experiment).map_err(|e| LabError::Config {
                what: e.to_string(),
            })?;
            let model = id.model(self);
            let mut controls = ControlState::new(id.id(), model.controls());
            self.apply_defaults(model.as_ref(), &mut controls)
                .map_err(|e| LabError::Config {
                    what: format!("{experiment}: {e}"),
                })?;
        }
        Ok(())
    }

    /// Apply the configured defaults for `model` to a fresh control panel.
    ///
    /// Choices are applied before numbers, with dependent bounds re-derived
    /// in between, so a default temperature is clamped to the configured
    /// material's range rather than the built-in one.
    pub fn apply_defaults(
        &self,
        model: &dyn ExperimentModel,
        controls: &mut ControlState,
    ) -> LabResult<()> {
        let Some(values) = self.defaults.get(model.id().id()) else {
            return Ok(());
        };
        let (choices, rest): (Vec<_>, Vec<_>) = values
            .iter()
            .partition(|(_, value)| matches!(value, DefaultValue::Text(_)));
        for (name, value) in choices.into_iter().chain(rest) {
            controls.override_default(name, &value.to_string())?;
            model.adjust_controls(controls)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: LabConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, LabConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn parses_overrides_of_every_kind() {
        let yaml = r#"
noise_seed: 7
sweeps:
  ldr_interval_ms: 250
defaults:
  carrier-mobility:
    material: germanium
    temperature_k: 350
    carrier_carrier: true
"#;
        let config: LabConfig = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.noise_seed, 7);
        assert_eq!(config.sweeps.ldr_interval(), Duration::from_millis(250));
        assert_eq!(config.sweeps.band_gap_interval_ms, 1000);
        let mobility = &config.defaults["carrier-mobility"];
        assert_eq!(mobility["carrier_carrier"], DefaultValue::Bool(true));
        assert_eq!(mobility["temperature_k"], DefaultValue::Number(350.0));
    }

    #[test]
    fn rejects_unknown_experiment_and_control() {
        let mut config = LabConfig::default();
        config
            .defaults
            .entry("fermi-function".to_string())
            .or_default()
            .insert("temperature_k".to_string(), DefaultValue::Number(300.0));
        assert!(matches!(config.validate(), Err(LabError::Config { .. })));

        let mut config = LabConfig::default();
        config
            .defaults
            .entry("band-gap".to_string())
            .or_default()
            .insert("pressure".to_string(), DefaultValue::Number(1.0));
        assert!(matches!(config.validate(), Err(LabError::Config { .. })));
    }

    #[test]
    fn material_default_widens_temperature_range() {
        let yaml = "defaults:
  band-gap:
    temperature_k: 580
    material: gallium_arsenide
";
        let config: LabConfig = serde_yaml::from_str(yaml).unwrap();
        let model = ExperimentId::BandGap.model(&config);
        let mut controls = ControlState::new("band-gap", model.controls());
        config.apply_defaults(model.as_ref(), &mut controls).unwrap();
        assert_eq!(controls.number("temperature_k").unwrap(), 580.0);
    }

    #[test]
    fn rejects_zero_interval() {
        let mut config = LabConfig::default();
        config.sweeps.band_gap_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_round_trip_through_file() {
        let dir = std::env::temp_dir().join("sl_lab_config_roundtrip");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lab.yaml");

        let mut config = LabConfig {
            noise_seed: 99,
            ..LabConfig::default()
        };
        let germanium = DefaultValue::Text("germanium".to_string());
        config
            .defaults
            .entry("photocell".to_string())
            .or_default()
            .insert("material".to_string(), germanium);
        config.save_yaml(&path).unwrap();
        assert_eq!(LabConfig::load_yaml(&path).unwrap(), config);
    }
}
