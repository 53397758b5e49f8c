//! Prompt templates sent to the model under test, the judge, and the
//! dataset generator.

use crate::types::{ContentKind, TestCase};

/// Assistant prefill that makes the model open a fenced JSON block.
pub const JSON_PREFILL: &str = "```json";

/// Stop sequence that closes the block opened by [`JSON_PREFILL`].
pub const FENCE: &str = "```";

/// Format instruction appended to a task prompt.
pub fn format_instruction(kind: Option<ContentKind>) -> &'static str {
    match kind {
        Some(ContentKind::Json) => "Please provide only the JSON output, properly formatted.",
        Some(ContentKind::Python) => {
            "Please provide only the Python code, properly formatted in a code block."
        }
        Some(ContentKind::Regex) => "Please provide only the regex pattern.",
        None => "Please provide your solution.",
    }
}

/// Prompt for the model under test.
pub fn task_prompt(case: &TestCase) -> String {
    format!(
        "Please solve the following task:\n{}\n\n{}\n",
        case.task,
        format_instruction(case.kind())
    )
}

/// Prompt asking the judge for a structured review of `output`.
pub fn judge_prompt(case: &TestCase, output: &str) -> String {
    format!(
        r#"You are an expert code reviewer. Evaluate this AI-generated solution.

Task: {task}
Expected Type: {kind}
Solution: {output}

Provide your evaluation as a structured JSON object with:
- "strengths": An array of 1-3 key strengths
- "weaknesses": An array of 1-3 key areas for improvement
- "reasoning": A concise explanation of your assessment
- "score": A number between 1-10
"#,
        task = case.task,
        kind = case.type_name(),
        output = output,
    )
}

/// Prompt asking for `count` new test cases about `topic`.
pub fn dataset_prompt(count: usize, topic: &str) -> String {
    format!(
        r#"Generate an evaluation dataset for a prompt evaluation. The dataset will be used to evaluate prompts
that generate Python, JSON, or Regex specifically for {topic} tasks. Generate an array of JSON objects,
each representing a task that requires Python, JSON, or a Regex to complete.

Example output:
```json
[
    {{
        "task": "Description of task",
        "type": "python"
    }},
    ...additional
]
```

* Each object has a "task" description and a "type" of "python", "json" or "regex".
* Focus on tasks that can be solved by writing a single Python function, a single JSON object, or a regular expression.
* Focus on tasks that do not require writing much code.

Please generate {count} objects.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_prompt_carries_kind_instruction() {
        let case = TestCase::new("Write a regex for ISO dates", Some("regex".into()));
        let prompt = task_prompt(&case);

        assert!(prompt.starts_with("Please solve the following task:\nWrite a regex for ISO dates"));
        assert!(prompt.contains("Please provide only the regex pattern."));
    }

    #[test]
    fn test_task_prompt_for_unknown_type_is_generic() {
        let case = TestCase::new("Describe a VPC", Some("yaml".into()));
        assert!(task_prompt(&case).contains("Please provide your solution."));

        let untyped = TestCase::new("Describe a VPC", None);
        assert!(task_prompt(&untyped).contains("Please provide your solution."));
    }

    #[test]
    fn test_judge_prompt_names_expected_type_and_fields() {
        let case = TestCase::new("Make a JSON policy", Some("JSON".into()));
        let prompt = judge_prompt(&case, "{\"Version\": \"2012-10-17\"}");

        assert!(prompt.contains("Task: Make a JSON policy"));
        assert!(prompt.contains("Expected Type: json"));
        assert!(prompt.contains("Solution: {\"Version\": \"2012-10-17\"}"));
        for field in ["\"strengths\"", "\"weaknesses\"", "\"reasoning\"", "\"score\""] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_dataset_prompt_mentions_count_and_topic() {
        let prompt = dataset_prompt(4, "AWS");
        assert!(prompt.contains("for AWS tasks"));
        assert!(prompt.contains("Please generate 4 objects."));
    }
}
