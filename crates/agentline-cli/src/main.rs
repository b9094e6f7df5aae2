//! agentline - parse agent output and replay progress notifications.

mod commands;
mod config;
mod error;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agentline_core::parser::{DefaultParser, GeminiOutputParser, OutputParser};
use agentline_core::transcript::TranscriptSink;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{load_config, NotifierOverrides};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "agentline", about = "Agent output parsing and progress notifications")]
struct Cli {
    /// JSON config file with `parser` and `notifier` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one generation as an action or a final answer
    Parse {
        /// File holding the model output (stdin when omitted)
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ParserKind::Gemini)]
        parser: ParserKind,
    },

    /// Drive a progress notifier from NDJSON lifecycle callbacks
    Replay {
        /// NDJSON script (stdin when omitted)
        script: Option<PathBuf>,

        #[arg(long)]
        agent: Option<String>,

        #[arg(long)]
        task: Option<String>,

        #[arg(long)]
        tools: Option<String>,

        /// Mirror delivered events to `<dir>/<session>.log`
        #[arg(long)]
        transcript_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ParserKind {
    /// Ignores placeholder final-answer markers
    Gemini,
    /// Base rules only
    Default,
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, CliError> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Parse { file, parser } => {
            let parser: Box<dyn OutputParser> = match parser {
                ParserKind::Gemini => Box::new(GeminiOutputParser::with_config(&config.parser)?),
                ParserKind::Default => Box::new(DefaultParser::with_config(&config.parser)),
            };
            let input = open_input(file.as_deref())?;
            commands::run_parse(input, io::stdout().lock(), parser.as_ref())
        }
        Command::Replay {
            script,
            agent,
            task,
            tools,
            transcript_dir,
        } => {
            let notifier = NotifierOverrides {
                agent_name: agent,
                task_name: task,
                tools_description: tools,
            }
            .apply(config.notifier);

            let session_id = new_session_id();
            let transcript = transcript_dir
                .map(|dir| TranscriptSink::create(&dir, &session_id))
                .transpose()?;
            let input = open_input(script.as_deref())?;
            let count =
                commands::run_replay(input, io::stdout().lock(), notifier, transcript)?;
            log::info!("Replay session {session_id} dispatched {count} callbacks");
            Ok(())
        }
    }
}

/// Transcript file name for one replay run.
fn new_session_id() -> String {
    agentline_core::notify::GroupId::new().0
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Parse(err)) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
