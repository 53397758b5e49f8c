//! `prompt-eval` binary.
//!
//! Exit status: 0 on success, 1 for API and runtime failures, 2 for usage
//! and configuration errors, 3 for unreadable datasets or results.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use prompt_eval_core::error::{EvalError, ExitCode as EvalExitCode};
use prompt_eval_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let Err(e) = commands::dispatch::run(&cli, start) else {
        return exit_with(EvalExitCode::Success);
    };

    match cli.format {
        OutputFormat::Json => eprintln!("{}", e.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", e),
        OutputFormat::Human => {}
    }
    exit_with(e.exit_code())
}

fn exit_with(code: EvalExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// clap fails before `Cli::format` is known, so the raw argv decides whether
/// the error goes out as a JSON envelope.
fn report_parse_error(err: clap::Error) -> ExitCode {
    let informational = matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
    if informational || !json_format_in(std::env::args().skip(1)) {
        err.exit();
    }

    let error = match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::ArgumentConflict => EvalError::UsageError(err.to_string()),
        _ => EvalError::Other(err.to_string()),
    };
    eprintln!("{}", error.to_json());
    exit_with(error.exit_code())
}

fn json_format_in(args: impl IntoIterator<Item = String>) -> bool {
    let args: Vec<String> = args.into_iter().collect();
    args.iter().any(|arg| arg == "--format=json")
        || args
            .windows(2)
            .any(|pair| pair[0] == "--format" && pair[1] == "json")
}

#[cfg(test)]
mod tests {
    use super::json_format_in;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_json_format_detected_in_raw_args() {
        assert!(json_format_in(argv(&["--format", "json", "run", "--bogus"])));
        assert!(json_format_in(argv(&["run", "--format=json"])));
        assert!(!json_format_in(argv(&["--format", "human", "run"])));
        assert!(!json_format_in(argv(&["--format"])));
        assert!(!json_format_in(argv(&["ask", "json"])));
    }
}
