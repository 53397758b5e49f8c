//! CLI argument parsing for prompt-eval
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use args::{ApiArgs, AskArgs, GenerateArgs, GradeArgs, ReportArgs, RunArgs};

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Human,
    /// Machine-readable JSON on stdout; errors as a JSON envelope on stderr
    Json,
}

/// prompt-eval - grade model outputs with syntax checks and an LLM judge
#[derive(Parser, Debug)]
#[command(name = "prompt-eval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: ./prompt-eval.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. debug, prompt_eval_core=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every test case of a dataset through the model and grade the outputs
    Run(RunArgs),

    /// Re-render the HTML report from a results file
    Report(ReportArgs),

    /// Code-grade a single output read from a file or stdin (offline)
    Grade(GradeArgs),

    /// Send a single message and print the answer
    Ask(AskArgs),

    /// Ask the model to write a new dataset file
    Generate(GenerateArgs),
}

impl Cli {
    /// Progress and informational lines are printed only in human mode
    pub fn chatty(&self) -> bool {
        self.format == OutputFormat::Human && !self.quiet
    }
}
