//! CLI entrypoint for scholar-pipeline
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scholar_application::{RunLogger, RunResearchInput, RunResearchUseCase};
use scholar_domain::{OutputFormat, Question};
use scholar_infrastructure::{
    ConfigLoader, FileConfig, JsonlRunLogger, OpenAiCompletionProvider, OpenAiSettings,
};
use scholar_presentation::{
    Cli, ConsoleFormatter, InteractiveSession, OutputFormatter, ProgressMode,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the key may come from the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on verbosity level, RUST_LOG wins when set
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting scholar-pipeline");

    // === Dependency Injection ===
    let Some(api_key) = config.provider.resolve_api_key() else {
        bail!(
            "No API key found. Set {} (a .env file works too) or provider.api_key in the config.",
            config.provider.api_key_env
        );
    };

    let settings = OpenAiSettings::new(api_key, &config.provider.base_url, config.provider.model())
        .with_temperature(config.provider.temperature)
        .with_request_timeout(config.pipeline.timeout_seconds.map(Duration::from_secs));
    let provider = Arc::new(OpenAiCompletionProvider::new(settings)?);

    let mut use_case =
        RunResearchUseCase::new(provider).with_params(config.pipeline.to_params());

    if let Some(path) = &config.logging.transcript {
        let logger = JsonlRunLogger::open(path)
            .with_context(|| format!("Failed to open transcript {}", path.display()))?;
        info!("Writing run transcript to {}", logger.path().display());
        use_case = use_case.with_run_logger(Arc::new(logger) as Arc<dyn RunLogger>);
    }

    let format = config.output.format.unwrap_or_default();
    let progress = ProgressMode::select(cli.quiet, cli.plain, std::io::stderr().is_terminal());

    // Interactive mode
    if cli.interactive {
        let session = InteractiveSession::new(use_case)
            .with_format(format)
            .with_progress(progress);
        session.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --interactive for interactive mode.");
    };
    let question = Question::try_from(question)?;

    if !cli.quiet && format != OutputFormat::Json {
        eprintln!();
        eprintln!("Question: {}", question);
        eprintln!("Model: {}", config.provider.model());
        eprintln!();
    }

    let input = RunResearchInput::new(question);

    let notifier = progress.notifier();
    let outcome = use_case
        .execute_with_progress(input, notifier.as_ref())
        .await?;

    println!("{}", ConsoleFormatter.render(&outcome, format));

    Ok(())
}

/// Load configuration and apply CLI overrides on top of it.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    if let Some(model) = &cli.model {
        config.provider.model = model.trim().to_string();
    }
    if let Some(passes) = cli.max_extra_passes {
        config.pipeline.max_extra_passes = passes;
    }
    if let Some(timeout) = cli.timeout {
        config.pipeline.timeout_seconds = Some(timeout);
    }
    if let Some(output) = cli.output {
        config.output.format = Some(output.into());
    }
    if let Some(path) = &cli.transcript {
        config.logging.transcript = Some(path.clone());
    }

    config.validate().context("Invalid configuration")?;
    debug!(
        "Model: {}, extra passes: {}, timeout: {:?}",
        config.provider.model, config.pipeline.max_extra_passes, config.pipeline.timeout_seconds
    );

    Ok(config)
}
