//! The backend-neutral writer trait.

use crate::row::{EpisodeSummaryRow, StepRow};
use crate::OutputResult;

/// Sink for episode output rows.  Implementations own their files and must
/// tolerate `finish` being called more than once.
pub trait OutputWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    fn write_summary(&mut self, row: &EpisodeSummaryRow) -> OutputResult<()>;

    /// Flush buffered rows.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
