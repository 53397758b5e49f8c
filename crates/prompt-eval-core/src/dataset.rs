//! Dataset and results files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::chat::{ChatModel, ChatSession, SendOptions};
use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::error::{EvalError, Result};
use crate::extract::bracket_span;
use crate::prompt::{dataset_prompt, FENCE, JSON_PREFILL};
use crate::types::{EvaluationRecord, TestCase};

/// Token budget for a generated dataset; roughly 100 tokens per case.
const TOKENS_PER_CASE: u32 = 100;
const MIN_GENERATION_TOKENS: u32 = 200;

fn read_file(path: &Path, context: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EvalError::not_found(context, path.display()),
        _ => EvalError::Io(e),
    })
}

/// Load a JSON array of test cases.
pub fn load_dataset(path: &Path) -> Result<Vec<TestCase>> {
    let content = read_file(path, "dataset")?;
    let cases: Vec<TestCase> =
        serde_json::from_str(&content).map_err(|e| EvalError::InvalidDataset {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    tracing::debug!(path = %path.display(), cases = cases.len(), "dataset loaded");
    Ok(cases)
}

/// Write a dataset as indented JSON.
pub fn save_dataset(path: &Path, cases: &[TestCase]) -> Result<()> {
    write_pretty(path, cases)
}

/// Write evaluation records as indented JSON.
pub fn save_results(path: &Path, records: &[EvaluationRecord]) -> Result<()> {
    write_pretty(path, records)?;
    tracing::debug!(path = %path.display(), records = records.len(), "results saved");
    Ok(())
}

/// Read back a file written by [`save_results`].
pub fn load_results(path: &Path) -> Result<Vec<EvaluationRecord>> {
    let content = read_file(path, "results file")?;
    serde_json::from_str(&content).map_err(|e| EvalError::InvalidResults {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn write_pretty<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Ask `model` for `count` new test cases about `topic`.
pub async fn generate_dataset<M: ChatModel>(
    model: &M,
    count: usize,
    topic: &str,
) -> Result<Vec<TestCase>> {
    if count == 0 {
        return Err(EvalError::invalid_value("count", count));
    }

    let mut session = ChatSession::new();
    session.add_user_message(dataset_prompt(count, topic));
    session.add_assistant_message(JSON_PREFILL);

    let budget = u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(TOKENS_PER_CASE)
        .max(MIN_GENERATION_TOKENS);
    let options = SendOptions::new(budget)
        .with_system(DEFAULT_SYSTEM_PROMPT)
        .with_stop_sequences(vec![FENCE.to_string()]);

    let reply = session.send(model, None, options).await?;
    parse_generated(&reply.answer)
}

fn parse_generated(answer: &str) -> Result<Vec<TestCase>> {
    let span = bracket_span(answer).ok_or_else(|| {
        EvalError::InvalidResponse("generated dataset contains no JSON array".to_string())
    })?;

    let cases: Vec<TestCase> = serde_json::from_str(&span)
        .map_err(|e| EvalError::InvalidResponse(format!("generated dataset: {}", e)))?;
    if cases.is_empty() {
        return Err(EvalError::InvalidResponse(
            "generated dataset is empty".to_string(),
        ));
    }
    Ok(cases)
}
