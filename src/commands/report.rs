//! `prompt-eval report`

use prompt_eval_core::dataset::load_results;
use prompt_eval_core::error::Result;
use prompt_eval_core::report::HtmlReport;
use prompt_eval_core::types::ScoreSummary;
use serde_json::json;

use crate::cli::{OutputFormat, ReportArgs};
use crate::commands::dispatch::CommandContext;

pub fn execute(ctx: &CommandContext, args: &ReportArgs) -> Result<()> {
    let results_path = args.results.as_ref().unwrap_or(&ctx.config.paths.results);
    let output_path = args.output.as_ref().unwrap_or(&ctx.config.paths.report);

    let records = load_results(results_path)?;
    std::fs::write(output_path, HtmlReport::default().render(&records))?;
    tracing::debug!(records = records.len(), output = %output_path.display(), "report_written");

    match ctx.cli.format {
        OutputFormat::Json => {
            let value = json!({
                "summary": ScoreSummary::from_records(&records),
                "report": output_path,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!("HTML report saved to: {}", output_path.display());
            }
        }
    }
    Ok(())
}
