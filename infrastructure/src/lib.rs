//! Infrastructure layer for scholar-pipeline
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the OpenAI-compatible completion provider,
//! the JSONL run transcript and configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FilePipelineConfig, FileProviderConfig,
};
pub use logging::JsonlRunLogger;
pub use providers::{OpenAiCompletionProvider, OpenAiSettings};
