//! Plain row structs shared by all output backends.

use chrono::NaiveDateTime;

/// One row per environment step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRow {
    pub step: u64,
    pub datetime: NaiveDateTime,
    pub reward: f64,
    pub generated: u32,
    pub dispatched: u32,
    pub repositioned: u32,
    pub queued: u32,
}

/// One row per finished episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeSummaryRow {
    pub steps: u64,
    pub total_reward: f64,
}
