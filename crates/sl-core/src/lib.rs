//! sl-core: shared foundation for semilab.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - constants (physical constants used by the evaluators)
//! - catalog (closed selector enums)
//! - error (shared error types)

pub mod catalog;
pub mod constants;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use catalog::Catalog;
pub use error::{SlError, SlResult};
pub use numeric::*;
pub use units::*;
