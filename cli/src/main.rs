//! CLI entrypoint for Kelly
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use kelly_application::AnswerPipeline;
use kelly_domain::{ChatSession, OutputFormat, Question};
use kelly_infrastructure::{ConfigLoader, FileConfig, GeminiGateway, JsonlConversationLogger};
use kelly_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressMode, formatter_for};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    dotenvy::dotenv().ok();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", ConsoleFormatter::format_config_issue(issue));
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting Kelly");

    let settings = config.to_settings()?;
    let pipeline_config = config.to_pipeline_config()?;

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiGateway::from_config(&config.gemini)?);
    let mut pipeline = AnswerPipeline::new(gateway, pipeline_config);

    let transcript = cli
        .conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log.as_ref().map(PathBuf::from));
    if let Some(path) = transcript {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => pipeline = pipeline.with_conversation_logger(Arc::new(logger)),
            None => warn!("Transcript disabled: cannot write {}", path.display()),
        }
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let progress = if cli.quiet {
        ProgressMode::Silent
    } else if config.repl.show_progress {
        ProgressMode::Spinner
    } else {
        ProgressMode::Lines
    };

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(pipeline, ChatSession::new(settings))
            .with_output_format(format)
            .with_progress(progress)
            .with_history_file(config.repl.history_file.as_deref());

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let Some(raw) = cli.question.as_deref() else {
        bail!("Question is required. Use --chat for interactive mode.");
    };
    let question = Question::parse(raw)?;

    let notifier = progress.notifier();
    let answer = pipeline
        .answer_with_progress(&question, &settings, notifier.as_ref())
        .await;

    println!("{}", formatter_for(format).format_answer(&question, &answer));

    Ok(())
}

/// CLI flags win over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.models.default = Some(model.clone());
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.answer.max_attempts = max_attempts;
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` takes precedence
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .context("--log-file must name a file")?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
