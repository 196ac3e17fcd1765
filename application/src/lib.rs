//! Application layer for scholar-pipeline
//!
//! This crate contains the research use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_MAX_EXTRA_PASSES, PipelineParams};
pub use ports::{
    completion_provider::{CompletionProvider, ProviderError},
    progress::{NoProgress, ProgressNotifier},
    run_logger::{NoRunLogger, RunEvent, RunLogger},
};
pub use use_cases::run_research::{RunResearchError, RunResearchInput, RunResearchUseCase};
