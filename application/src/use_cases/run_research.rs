//! Run Research use case
//!
//! Orchestrates a full research run:
//!
//! ```text
//! Splitting → Researching → Judging ⇄ Researching (bounded) → Synthesizing → Done
//! ```
//!
//! The research fan-out is the only concurrent part. Every provider failure
//! is fatal to the run; a report is never synthesized from incomplete
//! findings.

use crate::config::PipelineParams;
use crate::ports::completion_provider::{CompletionProvider, ProviderError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use scholar_domain::{
    DomainError, Findings, JudgeVerdict, PromptTemplate, Question, ResearchOutcome,
    SplitParseError, Stage, Subtopics, parse_subtopics, truncate,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a research run
#[derive(Error, Debug)]
pub enum RunResearchError {
    #[error("Could not split the question into subtopics: {reason}")]
    MalformedSplitResponse {
        reason: SplitParseError,
        /// Raw splitter output (truncated)
        raw: String,
    },

    #[error("{stage} failed{}: {source}", on_subtopic(.subtopic))]
    Provider {
        stage: Stage,
        subtopic: Option<String>,
        source: ProviderError,
    },

    #[error("{stage} task failed: {message}")]
    TaskFailed { stage: Stage, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

fn on_subtopic(subtopic: &Option<String>) -> String {
    match subtopic {
        Some(s) => format!(" for subtopic \"{}\"", s),
        None => String::new(),
    }
}

impl RunResearchError {
    /// Stage in which the run failed
    pub fn stage(&self) -> Stage {
        match self {
            RunResearchError::MalformedSplitResponse { .. } => Stage::Splitting,
            RunResearchError::Provider { stage, .. } | RunResearchError::TaskFailed { stage, .. } => {
                *stage
            }
            RunResearchError::Domain(_) => Stage::Researching,
        }
    }

    /// Subtopic being researched when the run failed, if any
    pub fn subtopic(&self) -> Option<&str> {
        match self {
            RunResearchError::Provider { subtopic, .. } => subtopic.as_deref(),
            _ => None,
        }
    }

    fn provider(stage: Stage, source: ProviderError) -> Self {
        RunResearchError::Provider {
            stage,
            subtopic: None,
            source,
        }
    }
}

/// Input for the RunResearch use case
#[derive(Debug, Clone)]
pub struct RunResearchInput {
    /// The question to research
    pub question: Question,
}

impl RunResearchInput {
    pub fn new(question: Question) -> Self {
        Self { question }
    }
}

/// Use case for running the research pipeline
///
/// Constructed once with an explicit provider handle; each `execute` call is
/// an independent run that shares nothing with other runs.
pub struct RunResearchUseCase<P: CompletionProvider + 'static> {
    provider: Arc<P>,
    params: PipelineParams,
    run_logger: Arc<dyn RunLogger>,
}

impl<P: CompletionProvider + 'static> RunResearchUseCase<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            params: PipelineParams::default(),
            run_logger: Arc::new(NoRunLogger),
        }
    }

    pub fn with_params(mut self, params: PipelineParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.run_logger = logger;
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunResearchInput,
    ) -> Result<ResearchOutcome, RunResearchError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunResearchInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchOutcome, RunResearchError> {
        let result = self.run(&input, progress).await;

        if let Err(e) = &result {
            warn!("Research run failed in {}: {}", e.stage(), e);
            progress.on_stage_failed(e.stage());
            self.run_logger.log(RunEvent::new(
                "run_failed",
                serde_json::json!({
                    "stage": e.stage(),
                    "subtopic": e.subtopic(),
                    "error": e.to_string(),
                }),
            ));
        }

        result
    }

    async fn run(
        &self,
        input: &RunResearchInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchOutcome, RunResearchError> {
        let question = input.question.content();
        info!("Starting research run");
        self.run_logger.log(RunEvent::new(
            "run_started",
            serde_json::json!({ "question": question }),
        ));

        // Stage 1: Splitting
        let subtopics = self.stage_split(question, progress).await?;

        // Stage 2: Initial research pass
        let mut findings = self.stage_research(&subtopics, 1, progress).await?;
        let mut passes = 1;

        // Stage 3: Judge-gated extra passes
        let max_extra = self.params.max_extra_passes;
        for extra in 0..max_extra {
            let verdict = self.stage_judge(&findings, progress).await?;
            progress.on_judge_verdict(&verdict, max_extra - extra);

            if !verdict.needs_more_research() {
                break;
            }

            info!(
                "Judge requested more research, extra pass {}/{}",
                extra + 1,
                max_extra
            );
            findings = self.stage_research(&subtopics, passes + 1, progress).await?;
            passes += 1;
        }

        // Stage 4: Synthesizing
        let report = self.stage_synthesize(question, &findings, progress).await?;

        info!("Research run complete after {} research pass(es)", passes);
        Ok(ResearchOutcome::new(
            question, subtopics, findings, report, passes,
        ))
    }

    /// Stage 1: Split the question into subtopics
    async fn stage_split(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Subtopics, RunResearchError> {
        info!("Stage: {}", Stage::Splitting);
        progress.on_stage_start(Stage::Splitting, 1);

        let raw = Self::complete(
            &self.provider,
            &self.params,
            &PromptTemplate::split_prompt(question),
        )
        .await
        .map_err(|e| {
            progress.on_task_complete(Stage::Splitting, Stage::Splitting.as_str(), false);
            RunResearchError::provider(Stage::Splitting, e)
        })?;

        let subtopics = parse_subtopics(&raw).map_err(|reason| {
            warn!("Malformed splitter response: {}", reason);
            progress.on_task_complete(Stage::Splitting, Stage::Splitting.as_str(), false);
            RunResearchError::MalformedSplitResponse {
                reason,
                raw: truncate(&raw, 200),
            }
        })?;

        info!("Subtopics: {:?}", subtopics.as_slice());
        self.run_logger.log(RunEvent::new(
            "subtopics",
            serde_json::json!({ "subtopics": subtopics }),
        ));

        progress.on_task_complete(Stage::Splitting, Stage::Splitting.as_str(), true);
        progress.on_stage_complete(Stage::Splitting);
        Ok(subtopics)
    }

    /// Stage 2: Research every subtopic concurrently
    ///
    /// All tasks must succeed. The first failure aborts the rest of the
    /// fan-out. Results are placed by index, so completion order does not
    /// affect alignment.
    async fn stage_research(
        &self,
        subtopics: &Subtopics,
        pass: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<Findings, RunResearchError> {
        info!("Stage: {} (pass {})", Stage::Researching, pass);
        progress.on_stage_start(Stage::Researching, subtopics.len());

        let mut join_set = JoinSet::new();

        for (index, subtopic) in subtopics.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let params = self.params;
            let subtopic = subtopic.to_string();

            join_set.spawn(async move {
                debug!("Researching: {}", subtopic);
                let prompt = PromptTemplate::research_prompt(&subtopic);
                let result = Self::complete(&provider, &params, &prompt).await;
                (index, subtopic, result)
            });
        }

        let mut slots: Vec<Option<String>> = vec![None; subtopics.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, subtopic, Ok(summary))) => {
                    debug!("Research complete: {}", subtopic);
                    progress.on_task_complete(Stage::Researching, &subtopic, true);
                    slots[index] = Some(summary.trim().to_string());
                }
                Ok((_, subtopic, Err(e))) => {
                    warn!("Research failed for \"{}\": {}", subtopic, e);
                    progress.on_task_complete(Stage::Researching, &subtopic, false);
                    join_set.abort_all();
                    return Err(RunResearchError::Provider {
                        stage: Stage::Researching,
                        subtopic: Some(subtopic),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Research task join error: {}", e);
                    join_set.abort_all();
                    return Err(RunResearchError::TaskFailed {
                        stage: Stage::Researching,
                        message: e.to_string(),
                    });
                }
            }
        }

        let findings = Findings::aligned(subtopics, slots.into_iter().flatten().collect())?;

        self.run_logger.log(RunEvent::new(
            "research_pass",
            serde_json::json!({ "pass": pass, "findings": findings }),
        ));

        progress.on_stage_complete(Stage::Researching);
        Ok(findings)
    }

    /// Stage 3: Ask whether the findings need another pass
    async fn stage_judge(
        &self,
        findings: &Findings,
        progress: &dyn ProgressNotifier,
    ) -> Result<JudgeVerdict, RunResearchError> {
        info!("Stage: {}", Stage::Judging);
        progress.on_stage_start(Stage::Judging, 1);

        let raw = Self::complete(
            &self.provider,
            &self.params,
            &PromptTemplate::judge_prompt(findings.as_slice()),
        )
        .await
        .map_err(|e| {
            progress.on_task_complete(Stage::Judging, Stage::Judging.as_str(), false);
            RunResearchError::provider(Stage::Judging, e)
        })?;

        let verdict = JudgeVerdict::parse(&raw);
        match &verdict {
            JudgeVerdict::NeedsMoreResearch => debug!("Judge: more research needed"),
            JudgeVerdict::Sufficient => debug!("Judge: findings sufficient"),
            JudgeVerdict::Malformed(text) => warn!(
                "Unrecognized judge response \"{}\", treating findings as sufficient",
                truncate(text, 80)
            ),
        }

        self.run_logger.log(RunEvent::new(
            "judge_verdict",
            serde_json::json!({
                "response": raw.trim(),
                "needs_more_research": verdict.needs_more_research(),
            }),
        ));

        progress.on_task_complete(Stage::Judging, Stage::Judging.as_str(), true);
        progress.on_stage_complete(Stage::Judging);
        Ok(verdict)
    }

    /// Stage 4: Synthesize the final report
    async fn stage_synthesize(
        &self,
        question: &str,
        findings: &Findings,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, RunResearchError> {
        info!("Stage: {}", Stage::Synthesizing);
        progress.on_stage_start(Stage::Synthesizing, 1);

        let report = Self::complete(
            &self.provider,
            &self.params,
            &PromptTemplate::synthesis_prompt(question, findings.as_slice()),
        )
        .await
        .map_err(|e| {
            progress.on_task_complete(Stage::Synthesizing, Stage::Synthesizing.as_str(), false);
            RunResearchError::provider(Stage::Synthesizing, e)
        })?;
        let report = report.trim().to_string();

        self.run_logger.log(RunEvent::new(
            "report",
            serde_json::json!({ "report": report }),
        ));

        progress.on_task_complete(Stage::Synthesizing, Stage::Synthesizing.as_str(), true);
        progress.on_stage_complete(Stage::Synthesizing);
        progress.on_stage_start(Stage::Done, 0);
        Ok(report)
    }

    /// One provider call with the configured timeout and retry policy
    async fn complete(
        provider: &P,
        params: &PipelineParams,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let mut attempt = 0;
        loop {
            let result = match params.call_timeout {
                Some(limit) => tokio::time::timeout(limit, provider.complete(prompt))
                    .await
                    .unwrap_or_else(|_| Err(ProviderError::Timeout(limit))),
                None => provider.complete(prompt).await,
            };

            match result {
                Err(e) if e.is_retryable() && attempt < params.max_retries => {
                    let delay = params.backoff_for(attempt);
                    attempt += 1;
                    warn!(
                        "Provider call failed ({}), retry {}/{} in {:?}",
                        e, attempt, params.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const SPLIT: &str = r#"["Solar cost trends", "Wind cost trends", "Environmental impact"]"#;

    // ==================== Test Mocks ====================

    /// Provider that answers by prompt kind and counts calls per kind
    struct ScriptedProvider {
        split_responses: Mutex<VecDeque<Result<String, ProviderError>>>,
        judge_responses: Mutex<VecDeque<String>>,
        default_judge: String,
        failing_subtopic: Option<String>,
        slow_subtopic: Option<String>,
        research_by_subtopic: Mutex<HashMap<String, usize>>,
        split_calls: AtomicUsize,
        research_calls: AtomicUsize,
        judge_calls: AtomicUsize,
        synthesis_calls: AtomicUsize,
        last_synthesis_prompt: Mutex<Option<String>>,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                split_responses: Mutex::new(VecDeque::new()),
                judge_responses: Mutex::new(VecDeque::new()),
                default_judge: "no".to_string(),
                failing_subtopic: None,
                slow_subtopic: None,
                research_by_subtopic: Mutex::new(HashMap::new()),
                split_calls: AtomicUsize::new(0),
                research_calls: AtomicUsize::new(0),
                judge_calls: AtomicUsize::new(0),
                synthesis_calls: AtomicUsize::new(0),
                last_synthesis_prompt: Mutex::new(None),
            }
        }

        fn with_split(self, response: Result<&str, ProviderError>) -> Self {
            self.split_responses
                .lock()
                .unwrap()
                .push_back(response.map(str::to_string));
            self
        }

        fn with_judge(self, answers: &[&str]) -> Self {
            self.judge_responses
                .lock()
                .unwrap()
                .extend(answers.iter().map(|s| s.to_string()));
            self
        }

        fn with_default_judge(mut self, answer: &str) -> Self {
            self.default_judge = answer.to_string();
            self
        }

        fn failing_on(mut self, subtopic: &str) -> Self {
            self.failing_subtopic = Some(subtopic.to_string());
            self
        }

        fn slow_on(mut self, subtopic: &str) -> Self {
            self.slow_subtopic = Some(subtopic.to_string());
            self
        }

        fn total_calls(&self) -> usize {
            self.split_calls.load(Ordering::SeqCst)
                + self.research_calls.load(Ordering::SeqCst)
                + self.judge_calls.load(Ordering::SeqCst)
                + self.synthesis_calls.load(Ordering::SeqCst)
        }

        fn quoted(prompt: &str) -> String {
            prompt.split('"').nth(1).unwrap_or_default().to_string()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
            if prompt.starts_with("Break the following") {
                self.split_calls.fetch_add(1, Ordering::SeqCst);
                return self
                    .split_responses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| Ok(SPLIT.to_string()));
            }

            if prompt.starts_with("Research this subtopic") {
                self.research_calls.fetch_add(1, Ordering::SeqCst);
                let subtopic = Self::quoted(prompt);
                let pass = {
                    let mut counts = self.research_by_subtopic.lock().unwrap();
                    let count = counts.entry(subtopic.clone()).or_insert(0);
                    *count += 1;
                    *count
                };

                // Earlier subtopics finish later, reversing completion order
                let delay = match subtopic.as_str() {
                    "Solar cost trends" => 30,
                    "Wind cost trends" => 15,
                    _ => 1,
                };
                tokio::time::sleep(Duration::from_millis(delay)).await;

                if self.slow_subtopic.as_deref() == Some(subtopic.as_str()) {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                }
                if self.failing_subtopic.as_deref() == Some(subtopic.as_str()) {
                    return Err(ProviderError::RequestFailed {
                        status: 500,
                        message: "upstream error".to_string(),
                    });
                }
                return Ok(format!("  Summary of {} (pass {})\n", subtopic, pass));
            }

            if prompt.starts_with("Evaluate whether") {
                self.judge_calls.fetch_add(1, Ordering::SeqCst);
                let answer = self
                    .judge_responses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| self.default_judge.clone());
                return Ok(answer);
            }

            if prompt.starts_with("Create a final") {
                self.synthesis_calls.fetch_add(1, Ordering::SeqCst);
                *self.last_synthesis_prompt.lock().unwrap() = Some(prompt.to_string());
                return Ok("\n  Final report: solar and wind are both competitive.  \n".to_string());
            }

            Err(ProviderError::InvalidResponse(format!(
                "unexpected prompt: {}",
                prompt
            )))
        }
    }

    /// Records every progress callback in order
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start:{}:{}", stage.as_str(), total_tasks));
        }

        fn on_task_complete(&self, stage: Stage, _label: &str, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("task:{}:{}", stage.as_str(), success));
        }

        fn on_stage_complete(&self, stage: Stage) {
            self.events
                .lock()
                .unwrap()
                .push(format!("complete:{}", stage.as_str()));
        }

        fn on_stage_failed(&self, stage: Stage) {
            self.events
                .lock()
                .unwrap()
                .push(format!("failed:{}", stage.as_str()));
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl RunLogger for RecordingLogger {
        fn log(&self, event: RunEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    fn input(question: &str) -> RunResearchInput {
        RunResearchInput::new(Question::try_new(question).unwrap())
    }

    fn use_case(provider: &Arc<ScriptedProvider>) -> RunResearchUseCase<ScriptedProvider> {
        RunResearchUseCase::new(Arc::clone(provider))
    }

    // ==================== Scenario Tests ====================

    #[tokio::test]
    async fn test_solar_vs_wind_single_pass() {
        let provider = Arc::new(ScriptedProvider::new());
        let outcome = use_case(&provider)
            .execute(input("Compare solar vs wind energy"))
            .await
            .unwrap();

        assert_eq!(outcome.question, "Compare solar vs wind energy");
        assert_eq!(outcome.subtopics.len(), 3);
        assert_eq!(outcome.findings.len(), 3);
        assert_eq!(outcome.research_passes, 1);
        assert_eq!(
            outcome.report,
            "Final report: solar and wind are both competitive."
        );

        // split + 3 research + synthesis, plus the one judge check
        assert_eq!(provider.split_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.research_calls.load(Ordering::SeqCst), 3);
        assert_eq!(provider.synthesis_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.judge_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.total_calls(), 6);
    }

    #[tokio::test]
    async fn test_findings_aligned_despite_completion_order() {
        let provider = Arc::new(ScriptedProvider::new());
        let outcome = use_case(&provider)
            .execute(input("Compare solar vs wind energy"))
            .await
            .unwrap();

        for (subtopic, finding) in outcome.findings.with_subtopics(&outcome.subtopics) {
            assert_eq!(finding, format!("Summary of {} (pass 1)", subtopic));
        }
    }

    #[tokio::test]
    async fn test_synthesis_receives_final_findings() {
        let provider = Arc::new(ScriptedProvider::new().with_judge(&["yes", "no"]));
        use_case(&provider)
            .execute(input("Compare solar vs wind energy"))
            .await
            .unwrap();

        let prompt = provider.last_synthesis_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("\"Compare solar vs wind energy\""));
        assert!(prompt.contains("Summary of Solar cost trends (pass 2)"));
        assert!(!prompt.contains("(pass 1)"));
    }

    // ==================== Loop Bound Tests ====================

    #[tokio::test]
    async fn test_judge_always_false_one_pass() {
        let provider = Arc::new(ScriptedProvider::new().with_default_judge("no"));
        let outcome = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(outcome.research_passes, 1);
        assert_eq!(provider.research_calls.load(Ordering::SeqCst), 3);
        assert_eq!(provider.judge_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_judge_always_true_three_passes() {
        let provider = Arc::new(ScriptedProvider::new().with_default_judge("yes"));
        let outcome = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(outcome.research_passes, 3);
        assert_eq!(provider.research_calls.load(Ordering::SeqCst), 9);
        // The judge is not consulted after the last allowed extra pass
        assert_eq!(provider.judge_calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.synthesis_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.total_calls(), 13);

        for (subtopic, finding) in outcome.findings.with_subtopics(&outcome.subtopics) {
            assert_eq!(finding, format!("Summary of {} (pass 3)", subtopic));
        }
    }

    #[tokio::test]
    async fn test_judge_yes_then_no_two_passes() {
        let provider = Arc::new(ScriptedProvider::new().with_judge(&["YES", "no"]));
        let outcome = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(outcome.research_passes, 2);
        assert_eq!(provider.research_calls.load(Ordering::SeqCst), 6);
        assert_eq!(provider.judge_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_judge_ends_loop() {
        let provider =
            Arc::new(ScriptedProvider::new().with_default_judge("Perhaps a little more?"));
        let outcome = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(outcome.research_passes, 1);
        assert_eq!(provider.judge_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_extra_passes_skips_judge() {
        let provider = Arc::new(ScriptedProvider::new().with_default_judge("yes"));
        let outcome = use_case(&provider)
            .with_params(PipelineParams::default().with_max_extra_passes(0))
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(outcome.research_passes, 1);
        assert_eq!(provider.judge_calls.load(Ordering::SeqCst), 0);
    }

    // ==================== Failure Tests ====================

    #[tokio::test]
    async fn test_malformed_split_aborts_before_research() {
        let provider = Arc::new(ScriptedProvider::new().with_split(Ok("not a list")));
        let err = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap_err();

        match &err {
            RunResearchError::MalformedSplitResponse { reason, raw } => {
                assert!(matches!(reason, SplitParseError::NotAStringList(_)));
                assert_eq!(raw, "not a list");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.stage(), Stage::Splitting);
        assert_eq!(provider.research_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.synthesis_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_split_with_two_subtopics_rejected() {
        let provider = Arc::new(ScriptedProvider::new().with_split(Ok(r#"["a", "b"]"#)));
        let err = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunResearchError::MalformedSplitResponse {
                reason: SplitParseError::WrongCount {
                    expected: 3,
                    found: 2
                },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_split_provider_error_is_fatal() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_split(Err(ProviderError::Authentication("invalid key".into()))),
        );
        let err = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Splitting);
        assert_eq!(
            err.to_string(),
            "Topic Splitting failed: Authentication rejected: invalid key"
        );
    }

    #[tokio::test]
    async fn test_research_failure_names_subtopic() {
        let provider = Arc::new(ScriptedProvider::new().failing_on("Wind cost trends"));
        let err = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Researching);
        assert_eq!(err.subtopic(), Some("Wind cost trends"));
        assert_eq!(
            err.to_string(),
            "Research failed for subtopic \"Wind cost trends\": Request failed (500): upstream error"
        );
        assert_eq!(provider.judge_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.synthesis_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_call_timeout_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new().slow_on("Environmental impact"));
        let err = use_case(&provider)
            .with_params(
                PipelineParams::default().with_call_timeout(Some(Duration::from_millis(100))),
            )
            .execute(input("Q"))
            .await
            .unwrap_err();

        match err {
            RunResearchError::Provider {
                stage,
                subtopic,
                source: ProviderError::Timeout(limit),
            } => {
                assert_eq!(stage, Stage::Researching);
                assert_eq!(subtopic.as_deref(), Some("Environmental impact"));
                assert_eq!(limit, Duration::from_millis(100));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(provider.synthesis_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transient_error_retried() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_split(Err(ProviderError::RateLimited("429".into())))
                .with_split(Ok(SPLIT)),
        );
        let outcome = use_case(&provider)
            .with_params(
                PipelineParams::default()
                    .with_max_retries(2)
                    .with_retry_backoff(Duration::from_millis(1)),
            )
            .execute(input("Q"))
            .await
            .unwrap();

        assert_eq!(provider.split_calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.research_passes, 1);
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let provider = Arc::new(
            ScriptedProvider::new().with_split(Err(ProviderError::RateLimited("429".into()))),
        );
        let err = use_case(&provider)
            .execute(input("Q"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunResearchError::Provider {
                source: ProviderError::RateLimited(_),
                ..
            }
        ));
        assert_eq!(provider.split_calls.load(Ordering::SeqCst), 1);
    }

    // ==================== Side Channel Tests ====================

    #[tokio::test]
    async fn test_progress_events_in_stage_order() {
        let provider = Arc::new(ScriptedProvider::new());
        let progress = RecordingProgress::default();
        use_case(&provider)
            .execute_with_progress(input("Q"), &progress)
            .await
            .unwrap();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events[0], "start:splitting:1");
        assert_eq!(events[1], "task:splitting:true");
        assert_eq!(events[2], "complete:splitting");
        assert_eq!(events[3], "start:researching:3");
        assert_eq!(
            events[4..7],
            ["task:researching:true", "task:researching:true", "task:researching:true"]
        );
        assert_eq!(events[7], "complete:researching");
        assert_eq!(events[8], "start:judging:1");
        assert_eq!(events.last().unwrap(), "start:done:0");
    }

    #[tokio::test]
    async fn test_progress_reports_failed_stage() {
        let provider = Arc::new(ScriptedProvider::new().failing_on("Wind cost trends"));
        let progress = RecordingProgress::default();
        use_case(&provider)
            .execute_with_progress(input("Q"), &progress)
            .await
            .unwrap_err();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events.last().unwrap(), "failed:researching");
        assert!(!events.contains(&"complete:researching".to_string()));
        assert!(events.contains(&"task:researching:false".to_string()));
    }

    #[tokio::test]
    async fn test_progress_reports_failed_split() {
        let provider = Arc::new(ScriptedProvider::new().with_split(Ok("not a list")));
        let progress = RecordingProgress::default();
        use_case(&provider)
            .execute_with_progress(input("Q"), &progress)
            .await
            .unwrap_err();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(
            events,
            ["start:splitting:1", "task:splitting:false", "failed:splitting"]
        );
    }

    #[tokio::test]
    async fn test_run_logger_records_transcript() {
        let provider = Arc::new(ScriptedProvider::new().with_judge(&["yes", "no"]));
        let logger = Arc::new(RecordingLogger::default());
        use_case(&provider)
            .with_run_logger(logger.clone())
            .execute(input("Compare solar vs wind energy"))
            .await
            .unwrap();

        let events = logger.events.lock().unwrap();
        let types: Vec<_> = events.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            [
                "run_started",
                "subtopics",
                "research_pass",
                "judge_verdict",
                "research_pass",
                "judge_verdict",
                "report"
            ]
        );
        assert_eq!(events[1].1["subtopics"][0], "Solar cost trends");
        assert_eq!(events[4].1["pass"], 2);
        assert_eq!(events[3].1["needs_more_research"], true);
    }

    #[tokio::test]
    async fn test_run_logger_records_failure() {
        let provider = Arc::new(ScriptedProvider::new().failing_on("Solar cost trends"));
        let logger = Arc::new(RecordingLogger::default());
        let _ = use_case(&provider)
            .with_run_logger(logger.clone())
            .execute(input("Q"))
            .await;

        let events = logger.events.lock().unwrap();
        let (event_type, payload) = events.last().unwrap();
        assert_eq!(*event_type, "run_failed");
        assert_eq!(payload["stage"], "researching");
        assert_eq!(payload["subtopic"], "Solar cost trends");
    }
}
