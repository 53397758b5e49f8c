//! Argument structs for each subcommand

use clap::Args;
use std::path::PathBuf;

/// Connection settings shared by every command that calls the API
#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL (default from config: https://api.anthropic.com)
    #[arg(long, env = "ANTHROPIC_BASE_URL")]
    pub api_base: Option<String>,

    /// Model under test (overrides [model].name)
    #[arg(long, short)]
    pub model: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Dataset file (JSON array of {task, type})
    #[arg(long, short)]
    pub dataset: Option<PathBuf>,

    /// Where to write the results JSON
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Where to write the HTML report
    #[arg(long, conflicts_with = "no_report")]
    pub report: Option<PathBuf>,

    /// Skip the HTML report
    #[arg(long)]
    pub no_report: bool,

    /// Judge model (default: [judge].name, then the model under test)
    #[arg(long)]
    pub judge_model: Option<String>,

    /// Echo the model's answers to stdout as they stream in
    #[arg(long)]
    pub stream: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Results file written by `run`
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// Output HTML file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GradeArgs {
    /// Content type to validate as (json, python, regex)
    #[arg(long = "type", short = 't')]
    pub content_type: String,

    /// File holding the model output (default: stdin)
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Message to send
    pub prompt: String,

    /// System prompt
    #[arg(long, short)]
    pub system: Option<String>,

    /// Maximum tokens to generate
    #[arg(long, default_value_t = 1000)]
    pub max_tokens: u32,

    /// Print the answer as it streams in
    #[arg(long)]
    pub stream: bool,

    /// Stop generating at this text (repeatable)
    #[arg(long)]
    pub stop: Vec<String>,

    /// Start the assistant's answer with this text
    #[arg(long)]
    pub prefill: Option<String>,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of test cases to ask for
    #[arg(long, short = 'n', default_value_t = 3)]
    pub count: usize,

    /// Subject area of the generated tasks
    #[arg(long, default_value = "AWS")]
    pub topic: String,

    /// Output dataset file (default: [paths].dataset)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}
