//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// "Kelly:" block for humans
    Text,
    /// One JSON object per answer
    Json,
}

impl From<OutputFormat> for kelly_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => kelly_domain::OutputFormat::Text,
            OutputFormat::Json => kelly_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for kelly
#[derive(Parser, Debug)]
#[command(name = "kelly")]
#[command(author, version, about = "Kelly - an analytical poet answering through Gemini")]
#[command(long_about = r#"
Kelly answers questions about AI, science and methodology as a short poem.

When Gemini blocks or fails to answer, Kelly retries with a reworded
question and the configured fallback models. If every attempt fails, a
locally composed poem is shown instead, so an answer always comes back.

The API key is read from GEMINI_API_KEY (a .env file is honoured).

Configuration files are loaded from (in priority order):
1. KELLY_* environment variables (e.g. KELLY_ANSWER__MAX_ATTEMPTS=4)
2. --config <path>     Explicit config file
3. ./kelly.toml        Project-level config
4. ~/.config/kelly/config.toml   Global config

Example:
  kelly "Explain the pipeline of a GAN"
  kelly -m gemini-2.5-pro -a 5 "How do I validate a survey instrument?"
  kelly --chat
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model tried first (e.g. gemini-2.5-pro)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Remote attempts before the local fallback (1-6)
    #[arg(short = 'a', long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append a JSONL transcript of every attempt to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}
