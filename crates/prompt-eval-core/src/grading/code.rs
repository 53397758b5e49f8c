use crate::extract::extract;
use crate::types::{CodeGradeResult, TestCase};
use crate::validate::validate;

pub const UNKNOWN_TYPE_FEEDBACK: &str = "Unknown content type - cannot validate";

/// Extracts the declared artifact from an output and checks its syntax.
#[derive(Debug, Clone, Copy)]
pub struct CodeGrader {
    unknown_type_score: u8,
}

impl Default for CodeGrader {
    fn default() -> Self {
        Self {
            unknown_type_score: 5,
        }
    }
}

impl CodeGrader {
    pub fn new(unknown_type_score: u8) -> Self {
        Self { unknown_type_score }
    }

    pub fn grade(&self, output: &str, case: &TestCase) -> CodeGradeResult {
        let Some(kind) = case.kind() else {
            return CodeGradeResult {
                score: self.unknown_type_score,
                feedback: UNKNOWN_TYPE_FEEDBACK.to_string(),
                extracted_content: None,
            };
        };

        let extracted = extract(output, kind);
        let validation = validate(&extracted, kind);
        tracing::debug!(
            kind = %kind,
            extracted_chars = extracted.len(),
            score = validation.score,
            "code grade"
        );

        CodeGradeResult {
            score: validation.score,
            feedback: validation.feedback,
            extracted_content: Some(extracted),
        }
    }
}
