//! Content extraction from raw model output.
//!
//! Each content kind has an ordered list of strategies; the first one that
//! matches wins and its capture is trimmed. When nothing matches, the whole
//! trimmed output is returned. This is a heuristic, not a parser: nested
//! braces, several code blocks, or metacharacters in prose can all pick the
//! wrong span.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::ContentKind;

type Strategy = fn(&str) -> Option<String>;

const JSON_STRATEGIES: &[Strategy] = &[fenced_json, brace_span];
const PYTHON_STRATEGIES: &[Strategy] = &[fenced_python, fenced_any];
const REGEX_STRATEGIES: &[Strategy] = &[fenced_regex, slash_delimited, metachar_run];

/// Extract the part of `output` most likely to be the requested artifact.
pub fn extract(output: &str, kind: ContentKind) -> String {
    let strategies = match kind {
        ContentKind::Json => JSON_STRATEGIES,
        ContentKind::Python => PYTHON_STRATEGIES,
        ContentKind::Regex => REGEX_STRATEGIES,
    };

    strategies
        .iter()
        .find_map(|strategy| strategy(output))
        .unwrap_or_else(|| output.trim().to_string())
}

/// Greedy span from the first `{` to the last `}`.
///
/// Also used to pull the judgment object out of a judge reply.
pub fn brace_span(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"(?s)\{.*\}"), text, 0)
}

/// Greedy span from the first `[` to the last `]`.
pub fn bracket_span(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"(?s)\[.*\]"), text, 0)
}

fn fenced_json(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"(?is)```json\s*(.*?)\s*```"), text, 1)
}

fn fenced_python(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"(?is)```python\s*(.*?)\s*```"), text, 1)
}

// A language tag other than `python` ends up inside the capture.
fn fenced_any(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"(?s)```\s*(.*?)\s*```"), text, 1)
}

fn fenced_regex(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"(?is)```regex\s*(.*?)\s*```"), text, 1)
}

fn slash_delimited(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"/(.*?)/"), text, 1)
}

fn metachar_run(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    capture(pattern(&RE, r"([\\^$.*+?{}()|\[\]]+)"), text, 1)
}

fn pattern<'a>(cell: &'a OnceLock<Regex>, source: &str) -> &'a Regex {
    cell.get_or_init(|| Regex::new(source).expect("extraction patterns are valid"))
}

fn capture(re: &Regex, text: &str, group: usize) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().trim().to_string())
}
