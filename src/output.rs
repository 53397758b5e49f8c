//! Console output for human-mode runs

use std::io::Write;
use std::path::Path;

use prompt_eval_core::chat::ChatReply;
use prompt_eval_core::types::{CodeGradeResult, ScoreSummary};

pub fn print_progress(index: usize, total: usize) {
    println!("Running test case {}/{}", index, total);
}

/// Write a streamed fragment without a newline and flush immediately.
pub fn print_delta(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

pub fn print_score_summary(summary: &ScoreSummary) {
    println!("\n=== SCORE SUMMARY ===");
    println!("Average Final Score: {:.2}", summary.average_final);
    println!("Average Model Score: {:.2}", summary.average_model);
    println!("Average Code Validation Score: {:.2}", summary.average_code);
}

pub fn print_artifacts(results: &Path, report: Option<&Path>) {
    println!("\nEvaluation complete!");
    println!("JSON results saved to: {}", results.display());
    if let Some(report) = report {
        println!("HTML report saved to: {}", report.display());
    }
}

pub fn print_code_grade(result: &CodeGradeResult) {
    println!("Score: {}/10", result.score);
    println!("Feedback: {}", result.feedback);
    if let Some(extracted) = &result.extracted_content {
        println!("Extracted:\n{}", extracted);
    }
}

pub fn print_usage(reply: &ChatReply) {
    let stop = reply.stop_reason.as_deref().unwrap_or("-");
    println!(
        "\n--- tokens: {} in, {} out (stop: {}) ---",
        reply.input_tokens, reply.output_tokens, stop
    );
}
