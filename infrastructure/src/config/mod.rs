//! Configuration file loading for scholar-pipeline
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SCHOLAR_*` environment variables (`SCHOLAR_PROVIDER__MODEL=gpt-4o`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./scholar.toml` or `./.scholar.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/scholar-pipeline/config.toml`
//! 5. Fallback: `~/.config/scholar-pipeline/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FilePipelineConfig, FileProviderConfig, MAX_EXTRA_PASSES_LIMIT,
};
pub use loader::ConfigLoader;
