//! sl-series: measurement series storage and export.

pub mod chart;
pub mod export;
pub mod store;
pub mod types;

pub use chart::ChartPoint;
pub use export::CsvTable;
pub use store::{Series, UpsertOutcome};
pub use types::*;

pub type SeriesResult<T> = Result<T, SeriesError>;

#[derive(thiserror::Error, Debug)]
pub enum SeriesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Point has {got} fields, layout has {expected} columns")]
    LayoutMismatch { expected: usize, got: usize },

    #[error("Column {index} out of range ({len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("Column '{header}' is not a key column")]
    NotAKey { header: String },

    #[error("Non-finite key in column '{header}': {value}")]
    NonFiniteKey { header: String, value: f64 },

    #[error("Invalid layout: {what}")]
    InvalidLayout { what: String },
}
