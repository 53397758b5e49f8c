mod support;

use predicates::prelude::*;
use std::fs;
use support::{message_reply, prompt_eval, prompt_eval_against, write_file, SAMPLE_RESULTS};
use tempfile::tempdir;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

#[test]
fn test_help_and_version() {
    let dir = tempdir().unwrap();

    prompt_eval(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("grade"));

    prompt_eval(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let dir = tempdir().unwrap();

    prompt_eval(dir.path())
        .args(["run", "--bogus"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_flag_with_json_format_emits_envelope() {
    let dir = tempdir().unwrap();

    prompt_eval(dir.path())
        .args(["--format", "json", "run", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_grade_json_from_stdin() {
    let dir = tempdir().unwrap();

    prompt_eval(dir.path())
        .args(["grade", "--type", "json"])
        .write_stdin("Sure:\n```json\n{\"a\": 1}\n```\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 10/10"))
        .stdout(predicate::str::contains("Feedback: Valid JSON structure"))
        .stdout(predicate::str::contains("{\"a\": 1}"));
}

#[test]
fn test_grade_broken_python_from_file_as_json() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "answer.txt", "```python\ndef broken(:\n    pass\n```");

    let output = prompt_eval(dir.path())
        .args(["--format", "json", "grade", "--type", "python", "--file", "answer.txt"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["score"], 0);
    assert!(value["feedback"]
        .as_str()
        .unwrap()
        .starts_with("Invalid Python syntax"));
}

#[test]
fn test_grade_unknown_type_is_neutral() {
    let dir = tempdir().unwrap();

    prompt_eval(dir.path())
        .args(["grade", "--type", "yaml"])
        .write_stdin("key: value")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 5/10"))
        .stdout(predicate::str::contains("Unknown content type - cannot validate"));
}

#[test]
fn test_grade_missing_file_is_data_error() {
    let dir = tempdir().unwrap();

    prompt_eval(dir.path())
        .args(["grade", "--type", "json", "--file", "nope.txt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_run_without_api_key_is_usage_error() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "dataset.json", r#"[{"task": "t", "type": "json"}]"#);

    prompt_eval(dir.path())
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("API key not found"));
}

#[test]
fn test_run_missing_dataset_is_data_error() {
    let dir = tempdir().unwrap();

    prompt_eval(dir.path())
        .args(["--format", "json", "run", "--api-key", "k"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"code\":3"))
        .stderr(predicate::str::contains("dataset not found"));
}

#[test]
fn test_invalid_config_weights_are_rejected() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "prompt-eval.toml",
        "[scoring]\nmodel_weight = 0.9\ncode_weight = 0.9\n",
    );

    prompt_eval(dir.path())
        .args(["grade", "--type", "json"])
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must sum to 1.0"));
}

#[test]
fn test_report_renders_results_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "evaluation_results.json", SAMPLE_RESULTS);

    prompt_eval(dir.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("evaluation_report.html"));

    let html = fs::read_to_string(dir.path().join("evaluation_report.html")).unwrap();
    assert!(html.contains("Comprehensive analysis of 1 test cases"));
    assert!(html.contains("8.2/10"));
    assert!(html.contains("Describe an S3 bucket &lt;as JSON&gt;"));
    assert!(html.contains("<li>Missing region</li>"));
}

#[test]
fn test_report_rejects_malformed_results() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "bad.json", "[{\"output\": 1}]");

    prompt_eval(dir.path())
        .args(["report", "--results", "bad.json", "--output", "out.html"])
        .assert()
        .code(3);
    assert!(!dir.path().join("out.html").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_end_to_end_against_mock_api() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .and(matchers::body_string_contains("Please solve the following task"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(message_reply("```json\n{\"a\":1}\n```")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .and(matchers::body_string_contains("expert code reviewer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_reply(
            r#"{"strengths": ["Exact"], "weaknesses": ["None"], "reasoning": "Correct", "score": 8}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "dataset.json",
        r#"[{"task": "Return the object {\"a\": 1}", "type": "json"}]"#,
    );

    prompt_eval_against(dir.path(), &server.uri())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running test case 1/1"))
        .stdout(predicate::str::contains("=== SCORE SUMMARY ==="))
        .stdout(predicate::str::contains("Average Final Score: 8.80"))
        .stdout(predicate::str::contains("Average Model Score: 8.00"))
        .stdout(predicate::str::contains("Average Code Validation Score: 10.00"));

    let results: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("evaluation_results.json")).unwrap(),
    )
    .unwrap();
    let record = &results[0];
    assert_eq!(record["final_score"], 8.8);
    assert_eq!(record["code_evaluation"]["extracted_content"], "{\"a\":1}");
    assert_eq!(record["usage"]["output_tokens"], 34);
    assert!(dir.path().join("evaluation_report.html").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_api_error_aborts_with_failure() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    write_file(dir.path(), "dataset.json", r#"[{"task": "t", "type": "regex"}]"#);

    prompt_eval_against(dir.path(), &server.uri())
        .args(["run", "--no-report"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("401"));
    assert!(!dir.path().join("evaluation_results.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_with_prefill_and_stop_sequence() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .and(matchers::body_partial_json(serde_json::json!({
            "stop_sequences": [", 5"],
            "messages": [
                {"role": "user", "content": "Count from 1 to 10"},
                {"role": "assistant", "content": "1, 2"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_reply(", 3, 4")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    prompt_eval_against(dir.path(), &server.uri())
        .args([
            "ask",
            "Count from 1 to 10",
            "--prefill",
            "1, 2",
            "--stop",
            ", 5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1, 2, 3, 4"))
        .stdout(predicate::str::contains("12 in, 34 out"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_writes_dataset() {
    let server = MockServer::start().await;
    let generated = r#"
[
  {"task": "Write a Python function that uploads a file to S3", "type": "python"},
  {"task": "Write a regex that matches an ARN", "type": "regex"}
]
"#;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .and(matchers::body_partial_json(serde_json::json!({"stop_sequences": ["```"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_reply(generated)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    prompt_eval_against(dir.path(), &server.uri())
        .args(["generate", "--count", "2", "--output", "cases.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 test cases"));

    let cases: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("cases.json")).unwrap()).unwrap();
    assert_eq!(cases.as_array().unwrap().len(), 2);
    assert_eq!(cases[1]["type"], "regex");

    prompt_eval_against(dir.path(), &server.uri())
        .args(["generate", "--output", "cases.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}
