//! `prompt-eval run`

use prompt_eval_core::dataset::{load_dataset, save_results};
use prompt_eval_core::error::Result;
use prompt_eval_core::report::HtmlReport;
use prompt_eval_core::runner::Runner;
use serde_json::json;

use crate::cli::{OutputFormat, RunArgs};
use crate::commands::dispatch::CommandContext;
use crate::output;

pub fn execute(ctx: &CommandContext, args: &RunArgs) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(model) = &args.api.model {
        config.model.name = model.clone();
    }
    if let Some(judge) = &args.judge_model {
        config.judge.name = Some(judge.clone());
    }
    config.model.stream |= args.stream;

    let client = ctx.client(&args.api)?;
    let judge = client.with_model(config.judge_model());
    let model = ctx.echo_stream(client);

    let dataset_path = args.dataset.as_ref().unwrap_or(&config.paths.dataset);
    let results_path = args.results.as_ref().unwrap_or(&config.paths.results);
    let report_path = if args.no_report {
        None
    } else {
        Some(args.report.as_ref().unwrap_or(&config.paths.report))
    };

    let dataset = load_dataset(dataset_path)?;
    tracing::info!(
        dataset = %dataset_path.display(),
        cases = dataset.len(),
        model = %config.model.name,
        judge = %config.judge_model(),
        "starting evaluation"
    );

    let runner = Runner::from_config(model, judge, &config);
    let chatty = ctx.cli.chatty();
    let streaming = config.model.stream;
    let run = ctx.block_on(runner.run_with_progress(&dataset, |index, total, _| {
        if chatty {
            if streaming && index > 1 {
                println!();
            }
            output::print_progress(index, total);
        }
    }))??;

    save_results(results_path, &run.records)?;
    if let Some(path) = report_path {
        let html = HtmlReport::default().render(&run.records);
        std::fs::write(path, html)?;
    }

    let summary = run.summary();
    match ctx.cli.format {
        OutputFormat::Json => {
            let value = json!({
                "summary": summary,
                "results": results_path,
                "report": report_path,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Human => {
            if streaming && chatty {
                println!();
            }
            output::print_score_summary(&summary);
            if !ctx.cli.quiet {
                output::print_artifacts(results_path, report_path.map(|p| p.as_path()));
            }
        }
    }

    Ok(())
}
