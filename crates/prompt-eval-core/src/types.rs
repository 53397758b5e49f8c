//! Record types shared by the graders, the runner and the report renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content kinds that have an extraction and validation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Json,
    Python,
    Regex,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Json, ContentKind::Python, ContentKind::Regex];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Json => "json",
            ContentKind::Python => "python",
            ContentKind::Regex => "regex",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared content type of a test case, as written in the dataset.
///
/// Known kinds are matched case-insensitively; anything else is kept
/// verbatim so it round-trips into the results file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    Known(ContentKind),
    Other(String),
}

impl ContentType {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn unknown() -> Self {
        ContentType::Other(Self::UNKNOWN.to_string())
    }

    pub fn kind(&self) -> Option<ContentKind> {
        match self {
            ContentType::Known(kind) => Some(*kind),
            ContentType::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Known(kind) => kind.as_str(),
            ContentType::Other(name) => name,
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        let lowered = value.trim().to_lowercase();
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .map(ContentType::Known)
            .unwrap_or(ContentType::Other(value))
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        ContentType::from(value.to_string())
    }
}

impl From<ContentKind> for ContentType {
    fn from(kind: ContentKind) -> Self {
        ContentType::Known(kind)
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Known(kind) => kind.as_str().to_string(),
            ContentType::Other(name) => name,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dataset entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub task: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
}

impl TestCase {
    pub fn new(task: impl Into<String>, content_type: Option<ContentType>) -> Self {
        Self {
            task: task.into(),
            content_type,
        }
    }

    /// The kind to grade against, if the declared type is one we can validate.
    pub fn kind(&self) -> Option<ContentKind> {
        self.content_type.as_ref().and_then(ContentType::kind)
    }

    /// Type name for prompts and reports; `unknown` when absent.
    pub fn type_name(&self) -> &str {
        self.content_type
            .as_ref()
            .map_or(ContentType::UNKNOWN, ContentType::as_str)
    }
}

/// Outcome of a syntax check: 10 when valid, 0 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub score: u8,
    pub feedback: String,
}

impl ValidationResult {
    pub const VALID: u8 = 10;
    pub const INVALID: u8 = 0;

    pub fn valid(feedback: impl Into<String>) -> Self {
        Self {
            score: Self::VALID,
            feedback: feedback.into(),
        }
    }

    pub fn invalid(feedback: impl Into<String>) -> Self {
        Self {
            score: Self::INVALID,
            feedback: feedback.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.score == Self::VALID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGradeResult {
    pub score: u8,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelGradeResult {
    pub score: f64,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub model_weight: f64,
    pub code_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedScore {
    pub final_score: f64,
    pub model_score: f64,
    pub code_score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Token counts reported by the chat API for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Everything recorded for one dataset entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub output: String,
    pub test_case: TestCase,
    pub model_evaluation: ModelGradeResult,
    pub code_evaluation: CodeGradeResult,
    pub merged_score: MergedScore,
    pub final_score: f64,
    #[serde(default)]
    pub usage: TokenUsage,
}

/// Arithmetic means over a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: usize,
    pub average_final: f64,
    pub average_model: f64,
    pub average_code: f64,
}

impl ScoreSummary {
    /// Averages are 0 for an empty slice.
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total = records.len();
        let mean =
            |f: fn(&EvaluationRecord) -> f64| records.iter().map(f).sum::<f64>() / total as f64;

        Self {
            total,
            average_final: mean(|r| r.final_score),
            average_model: mean(|r| r.model_evaluation.score),
            average_code: mean(|r| f64::from(r.code_evaluation.score)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_parses_case_insensitively() {
        assert_eq!(
            ContentType::from("JSON"),
            ContentType::Known(ContentKind::Json)
        );
        assert_eq!(
            ContentType::from(" Python "),
            ContentType::Known(ContentKind::Python)
        );
        assert_eq!(
            ContentType::from("yaml"),
            ContentType::Other("yaml".to_string())
        );
    }

    #[test]
    fn test_test_case_deserializes_with_and_without_type() {
        let cases: Vec<TestCase> =
            serde_json::from_str(r#"[{"task": "a", "type": "regex"}, {"task": "b"}]"#).unwrap();

        assert_eq!(cases[0].kind(), Some(ContentKind::Regex));
        assert_eq!(cases[1].content_type, None);
        assert_eq!(cases[1].type_name(), "unknown");
    }

    #[test]
    fn test_test_case_serializes_type_key() {
        let case = TestCase::new("task", Some(ContentKind::Json.into()));
        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["type"], "json");

        let untyped = serde_json::to_value(TestCase::new("task", None)).unwrap();
        assert!(untyped.get("type").is_none());
    }

    #[test]
    fn test_summary_of_empty_records_is_zero() {
        let summary = ScoreSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_final, 0.0);
        assert_eq!(summary.average_model, 0.0);
        assert_eq!(summary.average_code, 0.0);
    }

    #[test]
    fn test_record_without_usage_still_loads() {
        let json = r#"{
            "output": "x",
            "test_case": {"task": "t", "type": "json"},
            "model_evaluation": {"score": 7.0, "reasoning": "r", "strengths": [], "weaknesses": []},
            "code_evaluation": {"score": 10, "feedback": "Valid JSON structure", "extracted_content": "{}"},
            "merged_score": {"final_score": 8.2, "model_score": 7.0, "code_score": 10,
                             "breakdown": {"model_weight": 0.6, "code_weight": 0.4}},
            "final_score": 8.2
        }"#;

        let record: EvaluationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.usage, TokenUsage::default());
        assert_eq!(record.code_evaluation.extracted_content.as_deref(), Some("{}"));
    }
}
