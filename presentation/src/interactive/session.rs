//! Read-eval-print loop for interactive research

use crate::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::ProgressMode;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use scholar_application::{
    CompletionProvider, RunResearchError, RunResearchInput, RunResearchUseCase,
};
use scholar_domain::{OutputFormat, Question};
use std::path::PathBuf;
use tracing::warn;

const HISTORY_CAPACITY: usize = 500;
const EXAMPLE_QUESTION: &str =
    "Should I buy, hold, or sell Tesla stock in current market conditions?";

/// One line of user input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Empty,
    Quit,
    Help,
    Unknown(String),
    Question(String),
}

impl SessionInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        match line {
            "/quit" | "/exit" | "/q" => Self::Quit,
            "/help" | "/h" | "/?" => Self::Help,
            cmd if cmd.starts_with('/') => Self::Unknown(cmd.to_string()),
            question => Self::Question(question.to_string()),
        }
    }
}

/// Interactive research session
pub struct InteractiveSession<P: CompletionProvider + 'static> {
    use_case: RunResearchUseCase<P>,
    format: OutputFormat,
    progress: ProgressMode,
}

impl<P: CompletionProvider + 'static> InteractiveSession<P> {
    pub fn new(use_case: RunResearchUseCase<P>) -> Self {
        Self {
            use_case,
            format: OutputFormat::Full,
            progress: ProgressMode::Bars,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_progress(mut self, mode: ProgressMode) -> Self {
        self.progress = mode;
        self
    }

    /// Run the interactive loop until `/quit`, Ctrl-D or a terminal error
    pub async fn run(&self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();
        if let Some(history) = Self::history() {
            line_editor = line_editor.with_history(Box::new(history));
        }
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("scholar".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(buffer) => {
                    if !self.handle_input(SessionInput::parse(&buffer)).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn history() -> Option<FileBackedHistory> {
        let path: PathBuf = dirs::data_dir()?.join("scholar-pipeline").join("history.txt");
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
            Ok(history) => Some(history),
            Err(e) => {
                warn!("History disabled: {}", e);
                None
            }
        }
    }

    /// Returns false when the session should end.
    async fn handle_input(&self, input: SessionInput) -> bool {
        match input {
            SessionInput::Empty => {
                println!("{}", "Please enter a question first.".yellow());
                true
            }
            SessionInput::Quit => {
                println!("Bye!");
                false
            }
            SessionInput::Help => {
                Self::print_help();
                true
            }
            SessionInput::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                true
            }
            SessionInput::Question(question) => {
                println!();
                match self.answer(&question).await {
                    Ok(output) => println!("{}", output),
                    Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
                }
                println!();
                true
            }
        }
    }

    /// Run the pipeline for one question and render the outcome
    pub async fn answer(&self, question: &str) -> Result<String, RunResearchError> {
        let input = RunResearchInput::new(Question::try_from(question)?);

        let progress = self.progress.notifier();
        let outcome = self
            .use_case
            .execute_with_progress(input, progress.as_ref())
            .await?;

        Ok(ConsoleFormatter.render(&outcome, self.format))
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│      Scholar - Interactive Research         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask a question and a multi-step research workflow will run for you.");
        println!("Example: {}", EXAMPLE_QUESTION.dimmed());
        println!(
            "Extra research passes allowed: {}",
            self.use_case.params().max_extra_passes
        );
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /quit, /exit, /q - Exit");
        println!();
    }
}
