//! Progress notification port
//!
//! Defines the interface for reporting progress during a research run.

use scholar_domain::{JudgeVerdict, Stage};

/// Callback for progress updates during a research run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage, total_tasks: usize);

    /// Called when a task completes within a stage
    ///
    /// `label` is the subtopic for research tasks and the stage name otherwise.
    fn on_task_complete(&self, stage: Stage, label: &str, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: Stage);

    /// Called once when a stage aborts the run; no `on_stage_complete` follows
    fn on_stage_failed(&self, _stage: Stage) {}

    /// Called after each sufficiency check
    fn on_judge_verdict(&self, _verdict: &JudgeVerdict, _extra_passes_left: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: Stage, _label: &str, _success: bool) {}
    fn on_stage_complete(&self, _stage: Stage) {}
}
