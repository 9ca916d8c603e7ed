//! `EnvOutputObserver<W>` — bridges `EnvObserver` to an `OutputWriter`.

use chrono::NaiveDateTime;

use ems_env::{EnvObserver, Observation, StepInfo};

use crate::row::{EpisodeSummaryRow, StepRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`EnvObserver`] that writes step rows and episode summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `EnvObserver`
/// methods have no return value.  After the episode returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct EnvOutputObserver<W: OutputWriter> {
    writer:     W,
    steps:      u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EnvOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, steps: 0, last_error: None }
    }

    /// Take the stored write error (if any) after the episode returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the episode).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> EnvObserver for EnvOutputObserver<W> {
    fn on_reset(&mut self, _obs: &Observation) {
        self.steps = 0;
    }

    fn on_step_end(&mut self, step: u64, now: NaiveDateTime, reward: f64, info: &StepInfo) {
        self.steps = step;
        let row = StepRow {
            step,
            datetime: now,
            reward,
            generated: info.generated,
            dispatched: info.dispatched,
            repositioned: info.repositioned,
            queued: info.queued,
        };
        let result = self.writer.write_step(&row);
        self.store_err(result);
    }

    fn on_episode_end(&mut self, total_reward: f64) {
        let row = EpisodeSummaryRow { steps: self.steps, total_reward };
        let result = self.writer.write_summary(&row);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
