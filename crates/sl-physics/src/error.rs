//! Evaluator errors.
//!
//! The evaluators themselves never fail; only the post-processing steps
//! that need enough data (regressions) do.

use thiserror::Error;

/// Result type for physics post-processing.
pub type PhysicsResult<T> = Result<T, PhysicsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Not enough points for the requested fit.
    #[error("Need at least {needed} points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// All abscissae coincide, so the slope is undefined.
    #[error("Degenerate data for {what}")]
    Degenerate { what: &'static str },
}
