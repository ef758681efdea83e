use thiserror::Error;

pub type SlResult<T> = Result<T, SlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Unknown {kind}: {id}")]
    KindNotFound { kind: &'static str, id: String },
}
