//! Evaluation runner.
//!
//! Cases run one at a time, in dataset order. A failed call to the model
//! under test aborts the run; judge failures do not (see
//! [`ModelGrader::grade`]).

use std::time::Instant;

use crate::chat::{ChatModel, ChatSession, SendOptions};
use crate::config::{Config, DEFAULT_SYSTEM_PROMPT};
use crate::error::Result;
use crate::grading::{CodeGrader, ModelGrader, ScoreMerger};
use crate::prompt::task_prompt;
use crate::types::{ContentType, EvaluationRecord, ScoreSummary, TestCase};

/// How the model under test is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub system: String,
    pub max_tokens: u32,
    pub stream: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 200,
            stream: false,
        }
    }
}

impl RunSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            system: config.model.system.clone(),
            max_tokens: config.model.max_tokens,
            stream: config.model.stream,
        }
    }

    fn send_options(&self) -> SendOptions {
        SendOptions::new(self.max_tokens)
            .with_system(self.system.clone())
            .with_stream(self.stream)
    }
}

/// Ordered records of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationRun {
    pub records: Vec<EvaluationRecord>,
}

impl EvaluationRun {
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary::from_records(&self.records)
    }

    pub fn into_records(self) -> Vec<EvaluationRecord> {
        self.records
    }
}

pub struct Runner<M, J> {
    model: M,
    judge: ModelGrader<J>,
    code: CodeGrader,
    merger: ScoreMerger,
    settings: RunSettings,
}

impl<M: ChatModel, J: ChatModel> Runner<M, J> {
    pub fn new(model: M, judge: ModelGrader<J>) -> Self {
        Self {
            model,
            judge,
            code: CodeGrader::default(),
            merger: ScoreMerger::default(),
            settings: RunSettings::default(),
        }
    }

    /// Build a runner with graders and call settings taken from `config`.
    pub fn from_config(model: M, judge: J, config: &Config) -> Self {
        let scoring = &config.scoring;
        let grader = ModelGrader::new(judge)
            .with_max_tokens(config.judge.max_tokens)
            .with_fallback_score(scoring.judge_fallback_score);

        Self::new(model, grader)
            .with_code_grader(CodeGrader::new(scoring.unknown_type_score))
            .with_merger(ScoreMerger::new(scoring.weights()))
            .with_settings(RunSettings::from_config(config))
    }

    pub fn with_code_grader(mut self, code: CodeGrader) -> Self {
        self.code = code;
        self
    }

    pub fn with_merger(mut self, merger: ScoreMerger) -> Self {
        self.merger = merger;
        self
    }

    pub fn with_settings(mut self, settings: RunSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn run(&self, dataset: &[TestCase]) -> Result<EvaluationRun> {
        self.run_with_progress(dataset, |_, _, _| {}).await
    }

    /// Run every case; `progress(index, total, case)` fires before each one
    /// with a 1-based index.
    pub async fn run_with_progress<F>(
        &self,
        dataset: &[TestCase],
        mut progress: F,
    ) -> Result<EvaluationRun>
    where
        F: FnMut(usize, usize, &TestCase),
    {
        let total = dataset.len();
        let start = Instant::now();
        let mut records = Vec::with_capacity(total);

        for (i, case) in dataset.iter().enumerate() {
            let case = normalize(case);
            progress(i + 1, total, &case);
            records.push(self.run_case(case).await?);
        }

        tracing::info!(cases = total, elapsed = ?start.elapsed(), "evaluation finished");
        Ok(EvaluationRun { records })
    }

    async fn run_case(&self, case: TestCase) -> Result<EvaluationRecord> {
        let mut session = ChatSession::new();
        session.add_user_message(task_prompt(&case));
        let reply = session
            .send(&self.model, None, self.settings.send_options())
            .await?;
        let output = reply.answer.clone();

        let model_evaluation = self.judge.grade(&case, &output).await;
        let code_evaluation = self.code.grade(&output, &case);
        let merged_score = self.merger.merge(&model_evaluation, &code_evaluation);

        tracing::info!(
            task = %case.task,
            kind = %case.type_name(),
            model_score = model_evaluation.score,
            code_score = code_evaluation.score,
            final_score = merged_score.final_score,
            "case graded"
        );

        Ok(EvaluationRecord {
            output,
            test_case: case,
            final_score: merged_score.final_score,
            model_evaluation,
            code_evaluation,
            merged_score,
            usage: reply.usage(),
        })
    }
}

fn normalize(case: &TestCase) -> TestCase {
    let mut case = case.clone();
    if case.content_type.is_none() {
        tracing::warn!(task = %case.task, "test case has no type, grading as unknown");
        case.content_type = Some(ContentType::unknown());
    }
    case
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedModel;
    use crate::types::TokenUsage;

    const GOOD_JUDGMENT: &str =
        r#"{"strengths": ["Valid"], "weaknesses": ["Terse"], "reasoning": "Fine", "score": 8}"#;

    #[tokio::test]
    async fn test_json_case_end_to_end() {
        let model = ScriptedModel::new(["```json\n{\"a\":1}\n```"]);
        let judge = ScriptedModel::new([GOOD_JUDGMENT]);
        let runner = Runner::new(model, ModelGrader::new(judge));
        let dataset = vec![TestCase::new("Produce {\"a\":1}", Some("json".into()))];

        let run = runner.run(&dataset).await.unwrap();
        assert_eq!(run.records.len(), 1);

        let record = &run.records[0];
        assert_eq!(record.code_evaluation.score, 10);
        assert_eq!(record.code_evaluation.extracted_content.as_deref(), Some("{\"a\":1}"));
        assert_eq!(record.model_evaluation.score, 8.0);
        assert_eq!(record.final_score, 8.8);
        assert_eq!(record.merged_score.final_score, record.final_score);
        assert_eq!(
            record.usage,
            TokenUsage {
                input_tokens: 10,
                output_tokens: 20
            }
        );
    }

    #[tokio::test]
    async fn test_unbalanced_python_scores_zero() {
        let model = ScriptedModel::new(["```python\nprint((1)\n```"]);
        let judge = ScriptedModel::new([GOOD_JUDGMENT]);
        let runner = Runner::new(model, ModelGrader::new(judge));
        let dataset = vec![TestCase::new("Print one", Some("python".into()))];

        let run = runner.run(&dataset).await.unwrap();
        assert_eq!(run.records[0].code_evaluation.score, 0);
    }

    #[tokio::test]
    async fn test_empty_dataset() {
        let runner = Runner::new(
            ScriptedModel::failing(),
            ModelGrader::new(ScriptedModel::failing()),
        );

        let run = runner.run(&[]).await.unwrap();
        assert!(run.records.is_empty());
        assert_eq!(run.summary(), ScoreSummary::default());
    }

    #[tokio::test]
    async fn test_missing_type_is_normalized_and_progress_reported() {
        let model = ScriptedModel::new(["first", "second"]);
        let judge = ScriptedModel::new(["garbage", GOOD_JUDGMENT]);
        let runner = Runner::new(model, ModelGrader::new(judge));
        let dataset = vec![
            TestCase::new("one", None),
            TestCase::new("two", Some("regex".into())),
        ];

        let mut seen = Vec::new();
        let run = runner
            .run_with_progress(&dataset, |i, total, case| {
                seen.push((i, total, case.type_name().to_string()));
            })
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![(1, 2, "unknown".to_string()), (2, 2, "regex".to_string())]
        );
        let first = &run.records[0];
        assert_eq!(first.test_case.type_name(), "unknown");
        assert_eq!(first.code_evaluation.score, 5);
        assert_eq!(first.model_evaluation.score, 1.0);
        assert_eq!(first.final_score, 2.6);

        let summary = run.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.average_model, 4.5);
    }

    #[tokio::test]
    async fn test_model_failure_aborts_run() {
        let runner = Runner::new(
            ScriptedModel::failing(),
            ModelGrader::new(ScriptedModel::new([GOOD_JUDGMENT])),
        );
        let dataset = vec![TestCase::new("t", Some("json".into()))];

        assert!(runner.run(&dataset).await.is_err());
    }

    #[tokio::test]
    async fn test_settings_reach_model_under_test() {
        let mut config = Config::default();
        config.model.max_tokens = 123;
        config.model.stream = true;
        config.judge.max_tokens = 77;

        let runner = Runner::from_config(
            ScriptedModel::new(["{}"]),
            ScriptedModel::new([GOOD_JUDGMENT]),
            &config,
        );
        runner
            .run(&[TestCase::new("t", Some("json".into()))])
            .await
            .unwrap();

        let sent = runner.model.requests();
        assert_eq!(sent[0].options.max_tokens, 123);
        assert!(sent[0].options.stream);
        assert!(sent[0].messages[0].content.contains("Please provide only the JSON output"));
        assert_eq!(runner.judge.judge().requests()[0].options.max_tokens, 77);
    }
}
