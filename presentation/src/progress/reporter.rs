//! Progress reporting for research runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use scholar_application::{NoProgress, ProgressNotifier};
use scholar_domain::{JudgeVerdict, Stage};
use std::sync::Mutex;

/// Reports progress during a research run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_label(stage: Stage) -> &'static str {
        match stage {
            Stage::Splitting => "Step 1: Topic Splitting",
            Stage::Researching => "Step 2: Research",
            Stage::Judging => "Step 3: Sufficiency Check",
            Stage::Synthesizing => "Step 4: Synthesis",
            Stage::Done => "Done",
        }
    }

    fn println(&self, line: String) {
        // MultiProgress drops printed lines when its target is hidden
        if self.multi.is_hidden() || self.multi.println(&line).is_err() {
            eprintln!("{}", line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
        if stage == Stage::Done {
            self.println(format!("{}", "Done!".green().bold()));
            return;
        }

        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(Self::stage_label(stage));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _stage: Stage, label: &str, success: bool) {
        let Ok(slot) = self.stage_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: Stage) {
        let Ok(mut slot) = self.stage_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            pb.finish_with_message(format!("{} complete!", stage.display_name().green()));
        }
    }

    fn on_stage_failed(&self, stage: Stage) {
        let Ok(mut slot) = self.stage_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            pb.abandon_with_message(format!("{} failed", stage.display_name().red()));
        }
    }

    fn on_judge_verdict(&self, verdict: &JudgeVerdict, extra_passes_left: usize) {
        self.println(verdict_line(verdict, extra_passes_left));
    }
}

/// Simple text-based progress on stderr (no progress bars)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
        if stage == Stage::Done {
            eprintln!("{}", "Done!".green().bold());
            return;
        }
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::stage_label(stage).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _stage: Stage, label: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), label);
        }
    }

    fn on_stage_complete(&self, _stage: Stage) {
        eprintln!();
    }

    fn on_stage_failed(&self, stage: Stage) {
        eprintln!("  {} {} failed", "x".red(), stage.display_name());
    }

    fn on_judge_verdict(&self, verdict: &JudgeVerdict, extra_passes_left: usize) {
        eprintln!("{}", verdict_line(verdict, extra_passes_left));
    }
}

/// How progress is shown while a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// indicatif bars ([`ProgressReporter`])
    Bars,
    /// one line per event ([`SimpleProgress`])
    Plain,
    Off,
}

impl ProgressMode {
    /// Bars only make sense on a terminal; fall back to plain lines otherwise.
    pub fn select(quiet: bool, plain: bool, stderr_is_terminal: bool) -> Self {
        if quiet {
            ProgressMode::Off
        } else if plain || !stderr_is_terminal {
            ProgressMode::Plain
        } else {
            ProgressMode::Bars
        }
    }

    /// A fresh notifier for one run
    pub fn notifier(self) -> Box<dyn ProgressNotifier> {
        match self {
            ProgressMode::Bars => Box::new(ProgressReporter::new()),
            ProgressMode::Plain => Box::new(SimpleProgress),
            ProgressMode::Off => Box::new(NoProgress),
        }
    }
}

fn verdict_line(verdict: &JudgeVerdict, extra_passes_left: usize) -> String {
    match verdict {
        JudgeVerdict::NeedsMoreResearch if extra_passes_left > 0 => format!(
            "  {} more research needed ({} extra pass(es) left)",
            "?".yellow(),
            extra_passes_left
        ),
        JudgeVerdict::NeedsMoreResearch => {
            format!("  {} more research requested, no extra passes left", "?".yellow())
        }
        JudgeVerdict::Sufficient => format!("  {} findings are sufficient", "v".green()),
        JudgeVerdict::Malformed(_) => format!(
            "  {} unclear sufficiency answer, continuing with current findings",
            "!".yellow()
        ),
    }
}
