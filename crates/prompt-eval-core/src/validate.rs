//! Syntax validation for extracted content.
//!
//! Validity is all-or-nothing: 10 when the content parses or compiles, 0
//! otherwise, so it sits on the same scale as the judge's 1-10 score.

use std::panic;

use rustpython_parser::{parse, Mode};

use crate::types::{ContentKind, ValidationResult};

/// Validate `content` as the given kind.
pub fn validate(content: &str, kind: ContentKind) -> ValidationResult {
    match kind {
        ContentKind::Json => validate_json(content),
        ContentKind::Python => validate_python(content),
        ContentKind::Regex => validate_regex(content),
    }
}

pub fn validate_json(content: &str) -> ValidationResult {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(_) => ValidationResult::valid("Valid JSON structure"),
        Err(e) => ValidationResult::invalid(format!("Invalid JSON: {}", e)),
    }
}

/// Parse as a Python module. The code is never executed.
pub fn validate_python(content: &str) -> ValidationResult {
    // A parser panic on arbitrary input becomes a validation error.
    let parsed = panic::catch_unwind(|| parse(content, Mode::Module, "<unknown>"));

    match parsed {
        Ok(Ok(_)) => ValidationResult::valid("Valid Python syntax"),
        Ok(Err(e)) => ValidationResult::invalid(format!("Invalid Python syntax: {}", e)),
        Err(payload) => ValidationResult::invalid(format!(
            "Python validation error: {}",
            panic_message(payload.as_ref())
        )),
    }
}

/// Compile with the `regex` crate, the engine this tool runs on.
pub fn validate_regex(content: &str) -> ValidationResult {
    match regex::Regex::new(content) {
        Ok(_) => ValidationResult::valid("Valid regex pattern"),
        Err(e) => ValidationResult::invalid(format!("Invalid regex: {}", e)),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "parser aborted".to_string()
    }
}
