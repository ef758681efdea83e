//! Sweep state machine.
//!
//! ```text
//! Idle --start--> Running --tick past bound--> Idle
//!                    |
//!                    +------stop------------> Idle
//! ```
//!
//! The driver owns the sweep position and its timer; the caller evaluates
//! and records at the value each tick hands back.

use crate::clock::{Scheduler, TimerId};
use crate::{SweepError, SweepResult};
use sl_core::{round_to, step_decimals};
use std::time::Duration;
use tracing::info;

/// What to sweep, how far and how fast.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    pub control: String,
    pub step: f64,
    pub upper_bound: f64,
    pub interval: Duration,
}

impl SweepPlan {
    pub fn new(
        control: impl Into<String>,
        step: f64,
        upper_bound: f64,
        interval: Duration,
    ) -> SweepResult<Self> {
        let control = control.into();
        if !(step.is_finite() && step > 0.0) {
            return Err(SweepError::Invalid {
                what: format!("step of '{control}' must be positive, got {step}"),
            });
        }
        if !upper_bound.is_finite() {
            return Err(SweepError::Invalid {
                what: format!("bound of '{control}' must be finite"),
            });
        }
        if interval.is_zero() {
            return Err(SweepError::Invalid {
                what: format!("tick interval of '{control}' must be positive"),
            });
        }
        Ok(Self {
            control,
            step,
            upper_bound,
            interval,
        })
    }

    /// Value after `current`, with step-resolution noise removed.
    fn next_after(&self, current: f64) -> f64 {
        round_to(current + self.step, step_decimals(self.step))
    }

    fn exceeds(&self, value: f64) -> bool {
        value > self.upper_bound + self.step * 1e-9
    }
}

/// Position of a running sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepState {
    pub plan: SweepPlan,
    pub current: f64,
    pub timer: TimerId,
    pub recorded: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Tick from a timer this driver does not own (cancelled or foreign)
    Ignored,
    /// Record at `value`, then move the control to `next`
    Recorded { value: f64, next: f64 },
    /// Record at `value`; the sweep is over and the control stays put
    Finished { value: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SweepDriver {
    #[default]
    Idle,
    Running(SweepState),
}

impl SweepDriver {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    pub fn state(&self) -> Option<&SweepState> {
        match self {
            Self::Idle => None,
            Self::Running(state) => Some(state),
        }
    }

    /// Begin sweeping from `start` and arm the tick timer. Nothing is
    /// recorded until the first tick.
    pub fn start(
        &mut self,
        plan: SweepPlan,
        start: f64,
        scheduler: &mut dyn Scheduler,
    ) -> SweepResult<TimerId> {
        if let Self::Running(state) = self {
            return Err(SweepError::AlreadyRunning {
                control: state.plan.control.clone(),
            });
        }
        if plan.exceeds(start) {
            return Err(SweepError::StartBeyondBound {
                start,
                bound: plan.upper_bound,
            });
        }
        let timer = scheduler.schedule_repeating(plan.interval);
        info!(
            control = %plan.control,
            start,
            step = plan.step,
            bound = plan.upper_bound,
            interval_ms = plan.interval.as_millis() as u64,
            "sweep started"
        );
        *self = Self::Running(SweepState {
            plan,
            current: start,
            timer,
            recorded: 0,
        });
        Ok(timer)
    }

    /// Cancel the sweep without a final recording. Returns `false` if idle.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match std::mem::take(self) {
            Self::Idle => false,
            Self::Running(state) => {
                scheduler.cancel(state.timer);
                info!(
                    control = %state.plan.control,
                    at = state.current,
                    recorded = state.recorded,
                    "sweep stopped"
                );
                true
            }
        }
    }

    pub fn on_tick(&mut self, timer: TimerId, scheduler: &mut dyn Scheduler) -> TickOutcome {
        let Self::Running(state) = self else {
            return TickOutcome::Ignored;
        };
        if state.timer != timer {
            return TickOutcome::Ignored;
        }

        let value = state.current;
        let next = state.plan.next_after(value);
        state.recorded += 1;

        if state.plan.exceeds(next) {
            scheduler.cancel(state.timer);
            info!(
                control = %state.plan.control,
                last = value,
                recorded = state.recorded,
                "sweep finished"
            );
            *self = Self::Idle;
            return TickOutcome::Finished { value };
        }

        state.current = next;
        TickOutcome::Recorded { value, next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualScheduler;

    fn ldr_plan() -> SweepPlan {
        SweepPlan::new("voltage", 0.5, 10.0, Duration::from_millis(500)).unwrap()
    }

    #[test]
    fn stop_before_first_tick_records_nothing() {
        let mut clock = VirtualScheduler::new();
        let mut driver = SweepDriver::new();
        let timer = driver.start(ldr_plan(), 0.0, &mut clock).unwrap();
        assert!(driver.stop(&mut clock));
        assert_eq!(driver, SweepDriver::Idle);
        assert!(clock.advance(Duration::from_secs(10)).is_empty());
        assert_eq!(driver.on_tick(timer, &mut clock), TickOutcome::Ignored);
    }

    #[test]
    fn sweep_walks_to_bound_and_goes_idle() {
        let mut clock = VirtualScheduler::new();
        let mut driver = SweepDriver::new();
        driver.start(ldr_plan(), 8.5, &mut clock).unwrap();

        let mut recorded = Vec::new();
        while let Some(timer) = clock.advance_to_next() {
            match driver.on_tick(timer, &mut clock) {
                TickOutcome::Recorded { value, .. } => recorded.push(value),
                TickOutcome::Finished { value } => {
                    recorded.push(value);
                    break;
                }
                TickOutcome::Ignored => unreachable!(),
            }
        }
        assert_eq!(recorded, vec![8.5, 9.0, 9.5, 10.0]);
        assert!(!driver.is_running());
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.now(), Duration::from_millis(2000));
    }

    #[test]
    fn steps_do_not_accumulate_float_noise() {
        let plan = SweepPlan::new("x", 0.1, 1.0, Duration::from_millis(1)).unwrap();
        let mut v = 0.0;
        for _ in 0..7 {
            v = plan.next_after(v);
        }
        assert_eq!(v, 0.7);
    }

    #[test]
    fn second_start_is_rejected() {
        let mut clock = VirtualScheduler::new();
        let mut driver = SweepDriver::new();
        driver.start(ldr_plan(), 0.0, &mut clock).unwrap();
        let err = driver.start(ldr_plan(), 0.0, &mut clock).unwrap_err();
        assert!(matches!(err, SweepError::AlreadyRunning { .. }));
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn start_past_bound_is_rejected() {
        let mut clock = VirtualScheduler::new();
        let mut driver = SweepDriver::new();
        let err = driver.start(ldr_plan(), 10.5, &mut clock).unwrap_err();
        assert!(matches!(err, SweepError::StartBeyondBound { .. }));
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn foreign_timer_is_ignored() {
        let mut clock = VirtualScheduler::new();
        let other = clock.schedule_repeating(Duration::from_millis(100));
        let mut driver = SweepDriver::new();
        driver.start(ldr_plan(), 0.0, &mut clock).unwrap();
        assert_eq!(driver.on_tick(other, &mut clock), TickOutcome::Ignored);
        assert_eq!(driver.state().unwrap().recorded, 0);
    }

    #[test]
    fn plan_validation() {
        let tick = Duration::from_millis(1);
        assert!(SweepPlan::new("x", 0.0, 1.0, tick).is_err());
        assert!(SweepPlan::new("x", 1.0, f64::INFINITY, tick).is_err());
        assert!(SweepPlan::new("x", 1.0, 1.0, Duration::ZERO).is_err());
    }
}
