//! Console output formatter for research outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use scholar_domain::ResearchOutcome;

/// Formats research outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome
    pub fn format(outcome: &ResearchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("AI Research Assistant"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            outcome.question
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Research passes:".cyan().bold(),
            outcome.research_passes
        ));

        output.push_str(&Self::section_header("Identified subtopics"));
        for (i, subtopic) in outcome.subtopics.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, subtopic.bold()));
        }

        output.push_str(&Self::section_header("Research findings by subtopic"));
        for (i, (subtopic, finding)) in outcome.findings.with_subtopics(&outcome.subtopics).enumerate()
        {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── Subtopic {}: {} ──", i + 1, subtopic).yellow().bold(),
                finding.trim_end()
            ));
        }

        output.push_str(&Self::section_header("Final synthesized report"));
        output.push_str(&format!("\n{}\n", outcome.report.trim_end()));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ResearchOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final report only (concise output)
    pub fn format_report_only(outcome: &ResearchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Research Report ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), outcome.question));
        output.push_str(outcome.report.trim_end());
        output.push('\n');

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &ResearchOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &ResearchOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_report_only(&self, outcome: &ResearchOutcome) -> String {
        Self::format_report_only(outcome)
    }
}
