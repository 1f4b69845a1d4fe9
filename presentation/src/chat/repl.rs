//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::output::formatter::{OutputFormatter, formatter_for};
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use kelly_application::{AnswerPipeline, AnswerProgressNotifier, NoProgress};
use kelly_domain::{ChatSession, Model, OutputFormat, Question};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::{Path, PathBuf};

/// How much progress the REPL prints while attempts run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Spinner,
    Lines,
    Silent,
}

impl ProgressMode {
    /// Build the notifier this mode stands for
    pub fn notifier(self) -> Box<dyn AnswerProgressNotifier> {
        match self {
            ProgressMode::Spinner => Box::new(ProgressReporter::new()),
            ProgressMode::Lines => Box::new(SimpleProgress),
            ProgressMode::Silent => Box::new(NoProgress),
        }
    }
}

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Models,
    Model(Option<String>),
    Attempts(Option<String>),
    History,
    Clear,
    Config,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        match name {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/models" => ReplCommand::Models,
            "/model" => ReplCommand::Model(arg),
            "/attempts" => ReplCommand::Attempts(arg),
            "/history" => ReplCommand::History,
            "/clear" => ReplCommand::Clear,
            "/config" => ReplCommand::Config,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Continue(String),
    Exit,
}

/// Interactive chat REPL
///
/// Owns one [`ChatSession`]; `/model` and `/attempts` change only this
/// session's settings.
pub struct ChatRepl {
    pipeline: AnswerPipeline,
    session: ChatSession,
    formatter: Box<dyn OutputFormatter>,
    progress: ProgressMode,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(pipeline: AnswerPipeline, session: ChatSession) -> Self {
        Self {
            pipeline,
            session,
            formatter: formatter_for(OutputFormat::Text),
            progress: ProgressMode::Spinner,
            history_path: Self::default_history_path(),
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.formatter = formatter_for(format);
        self
    }

    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    /// Use a configured line-history file instead of the data dir default
    pub fn with_history_file(mut self, configured: Option<&str>) -> Self {
        if let Some(path) = configured.map(expand_home) {
            self.history_path = Some(path);
        }
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("kelly").join("history.txt"))
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("you> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        match self.execute_command(ReplCommand::parse(line)) {
                            CommandResult::Continue(text) => print!("{}", text),
                            CommandResult::Exit => {
                                println!("Bye!");
                                break;
                            }
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│      Kelly - the AI scientist poet          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Ask about AI, science, experiments or methodology. Model: {}",
            self.session.settings().model()
        );
        println!("Type /help for commands.");
        println!();
    }

    fn help_text() -> String {
        [
            "",
            "Commands:",
            "  /help, /h, /?     - Show this help",
            "  /models           - List selectable models",
            "  /model <id>       - Switch the model tried first",
            "  /attempts <n>     - Set attempts per question (1-6)",
            "  /history          - Show this session's answers",
            "  /clear            - Forget this session's answers",
            "  /config           - Show active settings",
            "  /quit, /exit, /q  - Exit chat",
            "",
            "",
        ]
        .join("\n")
    }

    /// Apply a slash command to the session and describe the result
    pub fn execute_command(&mut self, command: ReplCommand) -> CommandResult {
        let text = match command {
            ReplCommand::Quit => return CommandResult::Exit,
            ReplCommand::Help => Self::help_text(),
            ReplCommand::Models => {
                let current = self.session.settings().model();
                let mut text = String::from("Selectable models:\n");
                for model in Model::selectable() {
                    let mark = if &model == current { "*" } else { " " };
                    text.push_str(&format!("  {} {}\n", mark, model));
                }
                text.push_str("Any other Gemini model id is accepted with /model <id>.\n");
                text
            }
            ReplCommand::Model(None) => {
                format!("Current model: {}\n", self.session.settings().model())
            }
            ReplCommand::Model(Some(raw)) => match raw.parse::<Model>() {
                Ok(model) => {
                    let text = format!("Model set to {}\n", model);
                    self.session.set_model(model);
                    text
                }
                Err(e) => format!("Error: {}\n", e),
            },
            ReplCommand::Attempts(None) => format!(
                "Attempts per question: {}\n",
                self.session.settings().max_attempts()
            ),
            ReplCommand::Attempts(Some(raw)) => match raw.parse::<u32>() {
                Ok(n) => match self.session.set_max_attempts(n) {
                    Ok(()) => format!("Attempts per question set to {}\n", n),
                    Err(e) => format!("Error: {}\n", e),
                },
                Err(_) => format!("Error: '{}' is not a number\n", raw),
            },
            ReplCommand::History => ConsoleFormatter::format_history(&self.session),
            ReplCommand::Clear => {
                let dropped = self.session.len();
                self.session.clear();
                format!("Cleared {} exchange(s)\n", dropped)
            }
            ReplCommand::Config => {
                ConsoleFormatter::format_settings(self.session.settings(), self.pipeline.config())
            }
            ReplCommand::Unknown(name) => format!(
                "Unknown command: {}\nType /help for available commands\n",
                name
            ),
        };
        CommandResult::Continue(text)
    }

    async fn process_question(&mut self, line: &str) {
        let question = match Question::parse(line) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        println!();
        let answer = self.ask(&question).await;
        println!("{}", self.formatter.format_answer(&question, &answer));
        self.session.record(&question, &answer);
    }

    async fn ask(&self, question: &Question) -> kelly_domain::Answer {
        let progress = self.progress.notifier();
        self.pipeline
            .answer_with_progress(question, self.session.settings(), progress.as_ref())
            .await
    }
}

/// Expand a leading `~/` against the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => Path::new(path).to_path_buf(),
    }
}
