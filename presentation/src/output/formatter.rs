//! Output formatter trait

use scholar_domain::{OutputFormat, ResearchOutcome};

/// Trait for formatting research outcomes
pub trait OutputFormatter {
    /// Format the complete outcome: subtopics, findings and report
    fn format(&self, outcome: &ResearchOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &ResearchOutcome) -> String;

    /// Format the final report only
    fn format_report_only(&self, outcome: &ResearchOutcome) -> String;

    /// Format according to the selected [`OutputFormat`]
    fn render(&self, outcome: &ResearchOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(outcome),
            OutputFormat::Report => self.format_report_only(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }
}
