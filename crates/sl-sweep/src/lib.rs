//! sl-sweep: parameter sweeps.
//!
//! - `grid`: stepped and linear value grids for generated curves
//! - `clock`: the `Scheduler` timer abstraction and its virtual and
//!   wall-clock implementations
//! - `driver`: the `SweepDriver` Idle/Running state machine

pub mod clock;
pub mod driver;
pub mod grid;

pub use clock::{Scheduler, TimerId, VirtualScheduler, WallClockScheduler};
pub use driver::{SweepDriver, SweepPlan, SweepState, TickOutcome};
pub use grid::SweepDefinition;

pub type SweepResult<T> = Result<T, SweepError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid sweep: {what}")]
    Invalid { what: String },

    #[error("A sweep of '{control}' is already running")]
    AlreadyRunning { control: String },

    #[error("Start value {start} is beyond the sweep bound {bound}")]
    StartBeyondBound { start: f64, bound: f64 },
}
