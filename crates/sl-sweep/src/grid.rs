//! Value grids for generated curves.

use crate::{SweepError, SweepResult};
use sl_core::{round_to, snap_to_step, step_decimals};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// `n` evenly spaced points including both ends
    Points(usize),
    /// Fixed increment from the start; the end is included when it lies on
    /// the grid
    Step,
}

/// Evenly spaced values between `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub spacing: Spacing,
}

impl SweepDefinition {
    pub fn linear(start: f64, end: f64, num_points: usize) -> SweepResult<Self> {
        if num_points < 2 {
            return Err(SweepError::Invalid {
                what: "sweep must have at least 2 points".to_string(),
            });
        }
        check_range(start, end)?;
        if end == start {
            return Err(SweepError::Invalid {
                what: "start and end values must be different".to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            step: (end - start) / (num_points - 1) as f64,
            spacing: Spacing::Points(num_points),
        })
    }

    pub fn stepped(start: f64, end: f64, step: f64) -> SweepResult<Self> {
        check_range(start, end)?;
        if !(step.is_finite() && step > 0.0) {
            return Err(SweepError::Invalid {
                what: format!("step must be positive, got {step}"),
            });
        }
        Ok(Self {
            start,
            end,
            step,
            spacing: Spacing::Step,
        })
    }

    pub fn len(&self) -> usize {
        match self.spacing {
            Spacing::Points(n) => n,
            Spacing::Step => {
                // tolerate float error in (end - start) / step
                let span = (self.end - self.start) / self.step;
                (span + 1e-9).floor() as usize + 1
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.len();
        let mut points: Vec<f64> = (0..n)
            .map(|i| match self.spacing {
                Spacing::Points(_) => self.start + i as f64 * self.step,
                Spacing::Step => {
                    snap_to_step(self.start + i as f64 * self.step, self.start, self.step)
                }
            })
            .collect();
        if let Spacing::Points(_) = self.spacing {
            let decimals = step_decimals(self.step);
            for p in &mut points {
                *p = round_to(*p, decimals);
            }
            // Ensure exact endpoint
            points[n - 1] = self.end;
        }
        points
    }
}

fn check_range(start: f64, end: f64) -> SweepResult<()> {
    if !(start.is_finite() && end.is_finite()) {
        return Err(SweepError::Invalid {
            what: "sweep bounds must be finite".to_string(),
        });
    }
    if end < start {
        return Err(SweepError::Invalid {
            what: format!("end {end} is below start {start}"),
        });
    }
    Ok(())
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.spacing {
            Spacing::Points(n) => write!(f, "{} to {} ({} points)", self.start, self.end, n),
            Spacing::Step => write!(f, "{} to {} step {}", self.start, self.end, self.step),
        }
    }
}
