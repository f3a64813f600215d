//! Cancelable trailing-edge debounce
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling a new value
//! discards the pending one and restarts the quiescence window; the value
//! is released by [`Debouncer::poll`] once the window has elapsed with no
//! further input. Time comes from an injected [`Clock`] so behavior can be
//! driven deterministically.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Releases the latest scheduled value after a quiet period
#[derive(Debug)]
pub struct Debouncer<T, C: Clock = SystemClock> {
    window: Duration,
    clock: C,
    pending: Option<Pending<T>>,
}

impl<T, C: Clock> Debouncer<T, C> {
    /// Create a debouncer with the given quiescence window
    pub const fn new(window: Duration, clock: C) -> Self {
        Self {
            window,
            clock,
            pending: None,
        }
    }

    /// Schedule `value`, superseding anything pending
    pub fn schedule(&mut self, value: T) {
        let due = self.clock.now() + self.window;
        self.pending = Some(Pending { value, due });
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the pending value if its window has elapsed
    pub fn poll(&mut self) -> Option<T> {
        let now = self.clock.now();
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            return self.cancel();
        }
        None
    }

    /// Take the pending value regardless of the window
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value is released
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}
