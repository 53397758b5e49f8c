//! LLM-as-judge grading.
//!
//! The judge is asked for a JSON object; its reply is parsed leniently and
//! anything that still cannot be read collapses to a fixed low-score record.
//! Judge failures never abort an evaluation run.

use serde::Deserialize;

use crate::chat::{ChatModel, ChatSession, SendOptions};
use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::extract::brace_span;
use crate::prompt::{judge_prompt, JSON_PREFILL};
use crate::types::{ModelGradeResult, TestCase};

pub const FALLBACK_REASONING: &str = "Failed to parse model evaluation response";
pub const FALLBACK_WEAKNESS: &str = "Model evaluation parsing failed";
pub const DEFAULT_REASONING: &str = "No reasoning provided";

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Outcome of reading a judge reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Judgment {
    Parsed(ModelGradeResult),
    Unparseable(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SingleOrList {
    Single(String),
    List(Vec<String>),
}

impl From<SingleOrList> for Vec<String> {
    fn from(value: SingleOrList) -> Self {
        match value {
            SingleOrList::Single(item) => vec![item],
            SingleOrList::List(items) => items,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
struct RawJudgment {
    #[serde(default)]
    score: Option<RawScore>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    strengths: Option<SingleOrList>,
    #[serde(default)]
    strength: Option<SingleOrList>,
    #[serde(default)]
    weaknesses: Option<SingleOrList>,
    #[serde(default)]
    weakness: Option<SingleOrList>,
}

/// Read a judge reply into a [`Judgment`].
///
/// The object is taken from the first `{` to the last `}`; without braces
/// the whole trimmed reply is tried. `score` is required and clamped into
/// 1..=10. Plural list keys win over singular ones.
pub fn parse_judgment(reply: &str) -> Judgment {
    let candidate = brace_span(reply).unwrap_or_else(|| reply.trim().to_string());

    let value: serde_json::Value = match serde_json::from_str(&candidate) {
        Ok(value) => value,
        Err(e) => return Judgment::Unparseable(format!("judge reply is not valid JSON: {}", e)),
    };
    if !value.is_object() {
        return Judgment::Unparseable("judge reply is not a JSON object".to_string());
    }
    let raw: RawJudgment = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => return Judgment::Unparseable(format!("malformed judge fields: {}", e)),
    };

    let score = match raw.score {
        Some(RawScore::Number(n)) => n,
        Some(RawScore::Text(text)) => match text.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return Judgment::Unparseable(format!("non-numeric score {:?}", text)),
        },
        None => return Judgment::Unparseable("judge reply has no score".to_string()),
    };
    if !score.is_finite() {
        return Judgment::Unparseable(format!("non-finite score {}", score));
    }

    Judgment::Parsed(ModelGradeResult {
        score: score.clamp(MIN_SCORE, MAX_SCORE),
        reasoning: raw
            .reasoning
            .unwrap_or_else(|| DEFAULT_REASONING.to_string()),
        strengths: raw.strengths.or(raw.strength).map(Into::into).unwrap_or_default(),
        weaknesses: raw.weaknesses.or(raw.weakness).map(Into::into).unwrap_or_default(),
    })
}

/// Grades outputs by asking a judge model.
#[derive(Debug)]
pub struct ModelGrader<J> {
    judge: J,
    max_tokens: u32,
    fallback_score: f64,
}

impl<J: ChatModel> ModelGrader<J> {
    pub fn new(judge: J) -> Self {
        Self {
            judge,
            max_tokens: 500,
            fallback_score: MIN_SCORE,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_fallback_score(mut self, score: f64) -> Self {
        self.fallback_score = score;
        self
    }

    pub fn judge(&self) -> &J {
        &self.judge
    }

    /// The record used when the judge reply cannot be used.
    pub fn fallback(&self) -> ModelGradeResult {
        ModelGradeResult {
            score: self.fallback_score,
            reasoning: FALLBACK_REASONING.to_string(),
            strengths: Vec::new(),
            weaknesses: vec![FALLBACK_WEAKNESS.to_string()],
        }
    }

    /// Ask the judge to review `output`. Never fails.
    pub async fn grade(&self, case: &TestCase, output: &str) -> ModelGradeResult {
        match self.judge_once(case, output).await {
            Judgment::Parsed(result) => result,
            Judgment::Unparseable(reason) => {
                tracing::warn!(task = %case.task, reason = %reason, "judge fallback");
                self.fallback()
            }
        }
    }

    async fn judge_once(&self, case: &TestCase, output: &str) -> Judgment {
        let mut session = ChatSession::new();
        session.add_user_message(judge_prompt(case, output));
        session.add_assistant_message(JSON_PREFILL);

        let options = SendOptions::new(self.max_tokens).with_system(DEFAULT_SYSTEM_PROMPT);
        match session.send(&self.judge, None, options).await {
            Ok(reply) => {
                tracing::debug!(reply_chars = reply.answer.len(), "judge replied");
                parse_judgment(&reply.answer)
            }
            Err(e) => Judgment::Unparseable(format!("judge call failed: {}", e)),
        }
    }
}
