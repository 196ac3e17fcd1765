//! Presentation layer for scholar-pipeline
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive research session.

pub mod cli;
pub mod interactive;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, CliOutputFormat};
pub use interactive::InteractiveSession;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressMode, ProgressReporter, SimpleProgress};
