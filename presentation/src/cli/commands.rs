//! CLI command definitions

use clap::{Parser, ValueEnum};
use scholar_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for research results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliOutputFormat {
    /// Subtopics, findings per subtopic and the final report
    Full,
    /// Only the final report
    Report,
    /// JSON output
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Full => OutputFormat::Full,
            CliOutputFormat::Report => OutputFormat::Report,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for scholar
#[derive(Parser, Debug)]
#[command(name = "scholar")]
#[command(author, version, about = "AI research assistant - split, research, check, synthesize")]
#[command(long_about = r#"
Scholar runs a multi-step research workflow over an LLM for a single question.

The pipeline has four stages:
1. Topic Splitting: the question is broken into 3 research subtopics
2. Research: each subtopic is researched concurrently
3. Sufficiency Check: a judge decides whether more research is needed
   (at most 2 extra passes by default)
4. Synthesis: the findings are merged into a final report

Configuration files are loaded from (in priority order):
1. SCHOLAR_* environment variables (e.g. SCHOLAR_PROVIDER__MODEL)
2. --config <path>       Explicit config file
3. ./scholar.toml        Project-level config
4. ~/.config/scholar-pipeline/config.toml   Global config

The API key is read from OPENAI_API_KEY (or the variable named by
provider.api_key_env); a .env file in the working directory is honored.

Example:
  scholar "Should I buy, hold, or sell Tesla stock in current market conditions?"
  scholar -m gpt-4o --max-extra-passes 0 -o report "How do heat pumps work?"
  scholar --interactive
"#)]
pub struct Cli {
    /// The research question (not required in interactive mode)
    pub question: Option<String>,

    /// Start an interactive session
    #[arg(short, long)]
    pub interactive: bool,

    /// Model used for every stage
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Maximum number of judge-triggered extra research passes
    #[arg(long, value_name = "N")]
    pub max_extra_passes: Option<usize>,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Output format (defaults to the configured format, then "full")
    #[arg(short, long, value_enum)]
    pub output: Option<CliOutputFormat>,

    /// Append a JSONL transcript of each run to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Plain progress lines instead of progress bars
    #[arg(long, conflicts_with = "quiet")]
    pub plain: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
