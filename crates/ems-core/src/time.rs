//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is a civil [`NaiveDateTime`] advanced in fixed increments
//! of `step` per engine step.  A civil calendar (rather than a bare tick
//! counter) is required because emergency generation rates are modulated by
//! hour of day, weekday, and month — all properties of the *calendar* date,
//! not of elapsed time.
//!
//! The real-time clock is never consulted: only simulated time drives the
//! engine, so two runs with the same seed and action sequence are
//! bit-identical regardless of when they execute.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

/// Fixed-step simulation clock over a civil calendar.
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    /// Episode start (inclusive).
    pub start: NaiveDateTime,
    /// Episode end: the episode terminates once `now >= end`.
    pub end: NaiveDateTime,
    /// Simulated time advanced per step.  One minute by default — high
    /// enough to avoid sparse actions, low enough for timing accuracy.
    pub step: Duration,
    /// Current simulated time.
    pub now: NaiveDateTime,
    /// Steps taken since `start`.
    pub steps: u64,
}

impl SimClock {
    /// Create a clock positioned at `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, step: Duration) -> Self {
        Self { start, end, step, now: start, steps: 0 }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.now += self.step;
        self.steps += 1;
    }

    /// `true` once the episode end time has been reached or passed.
    #[inline]
    pub fn finished(&self) -> bool {
        self.now >= self.end
    }

    /// Step duration in seconds.
    #[inline]
    pub fn step_secs(&self) -> f64 {
        self.step.num_seconds() as f64
    }

    /// Whole steps elapsed since `earlier` (0 for future timestamps).
    pub fn steps_since(&self, earlier: NaiveDateTime) -> u64 {
        let secs = (self.now - earlier).num_seconds().max(0);
        let step = self.step.num_seconds().max(1);
        (secs / step) as u64
    }

    // ── Calendar accessors ────────────────────────────────────────────────

    /// Month of year, 1–12.
    #[inline]
    pub fn month(&self) -> u32 {
        self.now.month()
    }

    /// Day of month, 1–31.
    #[inline]
    pub fn day(&self) -> u32 {
        self.now.day()
    }

    /// Weekday with Monday = 1 … Sunday = 7.
    #[inline]
    pub fn weekday(&self) -> u32 {
        self.now.weekday().number_from_monday()
    }

    /// Hour of day, 0–23.
    #[inline]
    pub fn hour(&self) -> u32 {
        self.now.hour()
    }

    /// Minute of hour, 0–59.
    #[inline]
    pub fn minute(&self) -> u32 {
        self.now.minute()
    }

    /// The fixed-layout time-context vector exposed in observations:
    /// `[step_secs, month, day, weekday, hour, minute]`.
    pub fn context_vector(&self) -> [f64; 6] {
        [
            self.step_secs(),
            self.month() as f64,
            self.day() as f64,
            self.weekday() as f64,
            self.hour() as f64,
            self.minute() as f64,
        ]
    }
}

impl std::fmt::Display for SimClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (step {})", self.now, self.steps)
    }
}
