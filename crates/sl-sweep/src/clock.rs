//! Repeating timers.
//!
//! Sweeps never sleep on their own; they ask a [`Scheduler`] for a repeating
//! timer and react to its ticks. [`VirtualScheduler`] advances time only when
//! told to, so a whole sweep runs instantly and deterministically in tests.
//! [`WallClockScheduler`] blocks on real time.

use std::time::{Duration, Instant};

/// Handle of a scheduled timer. Never reused within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

pub trait Scheduler {
    /// Time elapsed since the scheduler was created.
    fn now(&self) -> Duration;

    /// Fire every `interval`, first at `now + interval`.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Cancel a timer. No tick of a cancelled timer is delivered afterwards.
    /// Returns `false` if the timer was not active.
    fn cancel(&mut self, id: TimerId) -> bool;

    fn is_active(&self, id: TimerId) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    id: TimerId,
    interval: Duration,
    next_due: Duration,
}

/// Active timers ordered by deadline, ties by creation order.
#[derive(Debug, Default)]
struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    fn schedule(&mut self, now: Duration, interval: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            interval,
            next_due: now + interval,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    fn contains(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    fn earliest(&self) -> Option<&Timer> {
        self.timers
            .iter()
            .min_by(|a, b| a.next_due.cmp(&b.next_due).then(a.id.cmp(&b.id)))
    }

    /// Pop the earliest deadline not after `limit` and re-arm its timer.
    fn fire_until(&mut self, limit: Duration) -> Option<(TimerId, Duration)> {
        let (id, due) = self.earliest().map(|t| (t.id, t.next_due))?;
        if due > limit {
            return None;
        }
        if let Some(timer) = self.timers.iter_mut().find(|t| t.id == id) {
            // zero intervals would fire forever at one instant
            timer.next_due += timer.interval.max(Duration::from_nanos(1));
        }
        Some((id, due))
    }
}

/// Deterministic clock driven by explicit `advance` calls.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    queue: TimerQueue,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `dt`, returning every tick due in the window in
    /// firing order.
    ///
    /// Ticks are collected before the caller sees them; a timer cancelled
    /// while handling this batch still appears in it, so handlers must
    /// ignore ticks from timers they no longer own. Use
    /// [`advance_to_next`](Self::advance_to_next) to interleave handling and
    /// cancellation.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let target = self.now + dt;
        let mut fired = Vec::new();
        while let Some((id, due)) = self.queue.fire_until(target) {
            self.now = due;
            fired.push(id);
        }
        self.now = target;
        fired
    }

    /// Jump to the next deadline and fire that single tick.
    pub fn advance_to_next(&mut self) -> Option<TimerId> {
        let (id, due) = self.queue.fire_until(Duration::MAX)?;
        self.now = due;
        Some(id)
    }

    pub fn pending(&self) -> usize {
        self.queue.timers.len()
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        self.queue.schedule(self.now, interval)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id)
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.queue.contains(id)
    }
}

/// Real-time scheduler; [`wait_next`](Self::wait_next) sleeps the calling
/// thread until the next deadline.
#[derive(Debug)]
pub struct WallClockScheduler {
    origin: Instant,
    queue: TimerQueue,
}

impl WallClockScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TimerQueue::default(),
        }
    }

    /// Block until the next tick. `None` when no timer is active.
    pub fn wait_next(&mut self) -> Option<TimerId> {
        let due = self.queue.earliest()?.next_due;
        let now = self.now();
        if due > now {
            std::thread::sleep(due - now);
        }
        self.queue.fire_until(due).map(|(id, _)| id)
    }
}

impl Default for WallClockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for WallClockScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let now = self.now();
        self.queue.schedule(now, interval)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id)
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.queue.contains(id)
    }
}
