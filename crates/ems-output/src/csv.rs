//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `step_log.csv`
//! - `episode_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{EpisodeSummaryRow, StepRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes episode output to two CSV files.
pub struct EpisodeCsvWriter {
    steps:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl EpisodeCsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut steps = Writer::from_path(dir.join("step_log.csv"))?;
        steps.write_record([
            "step",
            "datetime",
            "reward",
            "generated",
            "dispatched",
            "repositioned",
            "queued",
        ])?;

        let mut summaries = Writer::from_path(dir.join("episode_summaries.csv"))?;
        summaries.write_record(["steps", "total_reward"])?;

        Ok(Self { steps, summaries, finished: false })
    }
}

impl OutputWriter for EpisodeCsvWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.step.to_string(),
            row.datetime.to_string(),
            row.reward.to_string(),
            row.generated.to_string(),
            row.dispatched.to_string(),
            row.repositioned.to_string(),
            row.queued.to_string(),
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &EpisodeSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.steps.to_string(),
            row.total_reward.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
