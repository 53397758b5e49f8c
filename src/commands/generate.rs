//! `prompt-eval generate`

use prompt_eval_core::dataset::{generate_dataset, save_dataset};
use prompt_eval_core::error::{EvalError, Result};

use crate::cli::{GenerateArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext, args: &GenerateArgs) -> Result<()> {
    let output_path = args.output.as_ref().unwrap_or(&ctx.config.paths.dataset);
    if output_path.exists() && !args.force {
        return Err(EvalError::UsageError(format!(
            "{} already exists (use --force to overwrite)",
            output_path.display()
        )));
    }

    let client = ctx.client(&args.api)?;
    let cases = ctx.block_on(generate_dataset(&client, args.count, &args.topic))??;
    save_dataset(output_path, &cases)?;

    match ctx.cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cases)?),
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                for case in &cases {
                    println!("[{}] {}", case.type_name(), case.task);
                }
                println!(
                    "\nWrote {} test cases to {}",
                    cases.len(),
                    output_path.display()
                );
            }
        }
    }
    Ok(())
}
