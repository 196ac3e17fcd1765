//! Prompt templates for the research pipeline

use crate::research::entities::SUBTOPIC_COUNT;

/// Templates for generating the prompt of each pipeline stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt asking for exactly [`SUBTOPIC_COUNT`] subtopics as a JSON array
    pub fn split_prompt(question: &str) -> String {
        format!(
            r#"Break the following question into {count} clear research subtopics:
"{question}"

Return ONLY a JSON array of {count} strings, for example: ["sub1", "sub2", "sub3"].
Do not add any explanation before or after the array."#,
            count = SUBTOPIC_COUNT,
            question = question
        )
    }

    /// Prompt asking for a concise summary of one subtopic
    pub fn research_prompt(subtopic: &str) -> String {
        format!(
            r#"Research this subtopic and write a concise summary:
"{}""#,
            subtopic
        )
    }

    /// Prompt asking whether the findings need another research pass
    pub fn judge_prompt(findings: &[String]) -> String {
        let mut prompt =
            String::from("Evaluate whether the following findings appear thorough enough:\n");

        Self::push_findings(&mut prompt, findings);

        prompt.push_str(
            r#"
Answer with ONLY: "yes" or "no".
"yes" = more research is needed.
"no" = sufficient."#,
        );

        prompt
    }

    /// Prompt asking for the final report
    pub fn synthesis_prompt(question: &str, findings: &[String]) -> String {
        let mut prompt = format!(
            r#"Create a final, well-structured report for the query:
"{}"

Here are the research findings:
"#,
            question
        );

        Self::push_findings(&mut prompt, findings);

        prompt.push_str("\nReturn a clean narrative summary with bullet points where needed.");

        prompt
    }

    fn push_findings(prompt: &mut String, findings: &[String]) {
        for (i, finding) in findings.iter().enumerate() {
            prompt.push_str(&format!("\n--- Finding {} ---\n{}\n", i + 1, finding));
        }
    }
}
