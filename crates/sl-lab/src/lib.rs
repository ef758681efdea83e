//! Virtual semiconductor lab.
//!
//! Ties the formula evaluators to the measurement workflow: a [`Bench`]
//! owns one experiment's controls, its recorded series and its sweep
//! driver, and exports the series as CSV.

pub mod bench;
pub mod config;
pub mod controls;
pub mod error;
pub mod experiment;
pub mod experiments;

// Re-export key types for convenience
pub use bench::{Bench, ChartSource};
pub use config::{DefaultValue, LabConfig, SweepConfig, XrayConfig};
pub use controls::{ControlKind, ControlSpec, ControlState, ControlValue};
pub use error::{LabError, LabResult};
pub use experiment::{Companion, ExperimentId, ExperimentModel, Reading, ReadingValue};
