//! `prompt-eval grade`

use std::io::Read;

use prompt_eval_core::error::{EvalError, Result};
use prompt_eval_core::grading::CodeGrader;
use prompt_eval_core::types::TestCase;

use crate::cli::{GradeArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use crate::output;

pub fn execute(ctx: &CommandContext, args: &GradeArgs) -> Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EvalError::not_found("output file", path.display()),
            _ => e.into(),
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let case = TestCase::new(String::new(), Some(args.content_type.as_str().into()));
    let result = CodeGrader::new(ctx.config.scoring.unknown_type_score).grade(&text, &case);

    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Human => output::print_code_grade(&result),
    }
    Ok(())
}
