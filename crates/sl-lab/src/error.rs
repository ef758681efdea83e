//! Error types for the lab layer.

/// Errors from any layer below, plus control and bench misuse.
#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("Unknown control '{name}' on {experiment}")]
    UnknownControl { experiment: String, name: String },

    #[error("Control '{name}' is a {actual}, not a {expected}")]
    WrongControlKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid value for '{name}': {value}")]
    InvalidValue { name: String, value: String },

    #[error("{experiment} has no generated curve")]
    NoCurve { experiment: String },

    #[error("{experiment} has no timed sweep")]
    NoSweep { experiment: String },

    #[error("{experiment} keeps no companion table")]
    NoCompanion { experiment: String },

    #[error("Column '{header}' not found")]
    UnknownColumn { header: String },

    #[error("Invalid configuration: {what}")]
    Config { what: String },

    #[error(transparent)]
    Core(#[from] sl_core::SlError),

    #[error("Physics error: {0}")]
    Physics(#[from] sl_physics::PhysicsError),

    #[error("Series error: {0}")]
    Series(#[from] sl_series::SeriesError),

    #[error("Sweep error: {0}")]
    Sweep(#[from] sl_sweep::SweepError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type LabResult<T> = Result<T, LabError>;
