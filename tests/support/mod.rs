use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

/// Get a Command for prompt-eval isolated from the caller's environment.
///
/// Runs in `dir`, reads no user config and no ambient API credentials.
pub fn prompt_eval(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("prompt-eval");
    cmd.current_dir(dir)
        .env("PROMPT_EVAL_CONFIG_DIR", dir)
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("ANTHROPIC_BASE_URL")
        .env_remove("RUST_LOG")
        .env_remove("PROMPT_EVAL_LOG");
    cmd
}

/// Same as [`prompt_eval`], pointed at a mock API server.
#[allow(dead_code)]
pub fn prompt_eval_against(dir: &Path, api_base: &str) -> Command {
    let mut cmd = prompt_eval(dir);
    cmd.env("ANTHROPIC_API_KEY", "test-key")
        .env("ANTHROPIC_BASE_URL", api_base);
    cmd
}

/// Body of a non-streaming Messages API reply.
#[allow(dead_code)]
pub fn message_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 12, "output_tokens": 34}
    })
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// A results file holding one graded JSON case.
#[allow(dead_code)]
pub const SAMPLE_RESULTS: &str = r#"[
  {
    "output": "```json\n{\"bucket\": \"logs\"}\n```",
    "test_case": {"task": "Describe an S3 bucket <as JSON>", "type": "json"},
    "model_evaluation": {
      "score": 7.0,
      "reasoning": "Minimal but valid",
      "strengths": ["Valid JSON"],
      "weaknesses": ["Missing region"]
    },
    "code_evaluation": {
      "score": 10,
      "feedback": "Valid JSON structure",
      "extracted_content": "{\"bucket\": \"logs\"}"
    },
    "merged_score": {
      "final_score": 8.2,
      "model_score": 7.0,
      "code_score": 10,
      "breakdown": {"model_weight": 0.6, "code_weight": 0.4}
    },
    "final_score": 8.2
  }
]
"#;
