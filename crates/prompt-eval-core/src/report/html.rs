//! Static HTML report
//!
//! One self-contained page: summary cards, per-type counts, then a section
//! per test case with a collapsible raw output.

use std::fmt::Write as _;

use crate::types::{EvaluationRecord, ScoreSummary};

const STYLE: &str = r#"
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 20px; background-color: #f5f7fa; }
        .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 10px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); overflow: hidden; }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; }
        .header h1 { margin: 0; font-size: 2.5em; font-weight: 300; }
        .header p { margin: 10px 0 0 0; opacity: 0.9; }
        .summary { padding: 30px; background: #f8fafc; border-bottom: 1px solid #e2e8f0; }
        .summary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 20px; }
        .summary-card { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1); text-align: center; }
        .summary-card h3 { margin: 0 0 10px 0; color: #4a5568; font-size: 0.9em; text-transform: uppercase; letter-spacing: 1px; }
        .summary-card .value { font-size: 2em; font-weight: bold; color: #2d3748; }
        .type-breakdown { display: flex; gap: 10px; flex-wrap: wrap; }
        .type-badge { background: #4299e1; color: white; padding: 5px 15px; border-radius: 20px; font-size: 0.9em; }
        .test-case { border-bottom: 1px solid #e2e8f0; padding: 25px; transition: background-color 0.3s; }
        .test-case:hover { background: #f7fafc; }
        .test-case:last-child { border-bottom: none; }
        .test-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 15px; }
        .test-number { background: #4a5568; color: white; padding: 5px 15px; border-radius: 20px; font-weight: bold; font-size: 0.9em; }
        .test-type { background: #38b2ac; color: white; padding: 5px 15px; border-radius: 20px; font-size: 0.9em; text-transform: uppercase; }
        .task-description { background: #edf2f7; padding: 15px; border-radius: 6px; margin-bottom: 20px; font-style: italic; color: #4a5568; }
        .scores { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 15px; margin-bottom: 20px; }
        .score-item { text-align: center; padding: 15px; background: white; border: 2px solid #e2e8f0; border-radius: 8px; }
        .score-item.final { border-color: #38b2ac; background: #e6fffa; }
        .score-value { font-size: 1.8em; font-weight: bold; color: #2d3748; }
        .score-label { font-size: 0.8em; color: #718096; text-transform: uppercase; letter-spacing: 1px; }
        .details { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; margin-top: 20px; }
        .detail-section { background: #f7fafc; padding: 15px; border-radius: 6px; }
        .detail-section h4 { margin: 0 0 10px 0; color: #4a5568; font-size: 1em; }
        .detail-section p { margin: 5px 0; color: #718096; line-height: 1.4; }
        .strengths, .weaknesses { list-style: none; padding: 0; }
        .strengths li { background: #c6f6d5; color: #22543d; padding: 8px 12px; margin: 5px 0; border-radius: 4px; border-left: 4px solid #38a169; }
        .weaknesses li { background: #fed7d7; color: #742a2a; padding: 8px 12px; margin: 5px 0; border-radius: 4px; border-left: 4px solid #e53e3e; }
        .output-section { grid-column: 1 / -1; background: #2d3748; color: #e2e8f0; padding: 15px; border-radius: 6px; font-family: 'Monaco', 'Courier New', monospace; font-size: 0.9em; white-space: pre-wrap; overflow-x: auto; }
        .toggle-output { background: #4299e1; color: white; border: none; padding: 8px 16px; border-radius: 4px; cursor: pointer; font-size: 0.9em; margin-bottom: 10px; }
        .toggle-output:hover { background: #3182ce; }
        .output-content { display: none; }
        .timestamp { color: #a0aec0; font-size: 0.8em; text-align: center; padding: 15px; }
        @media (max-width: 768px) {
            .details, .scores, .summary-grid { grid-template-columns: 1fr; }
        }
"#;

const SCRIPT: &str = r#"
        function toggleOutput(testId) {
            const output = document.getElementById('output-' + testId);
            if (output.style.display === 'none' || output.style.display === '') {
                output.style.display = 'block';
            } else {
                output.style.display = 'none';
            }
        }
"#;

/// HTML report generator
#[derive(Debug, Clone)]
pub struct HtmlReport {
    title: String,
    show_timestamp: bool,
}

impl Default for HtmlReport {
    fn default() -> Self {
        Self::new("AI Evaluation Report")
    }
}

impl HtmlReport {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            show_timestamp: true,
        }
    }

    /// Omit the generation time, for byte-stable output.
    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.show_timestamp = false;
        self
    }

    /// Render the full document for `records`, in order.
    pub fn render(&self, records: &[EvaluationRecord]) -> String {
        let summary = ScoreSummary::from_records(records);
        let cases: String = records
            .iter()
            .enumerate()
            .map(|(i, record)| Self::render_case(i + 1, record))
            .collect();
        let footer = if self.show_timestamp {
            format!(
                r#"<div class="timestamp">Generated {}</div>"#,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            )
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{title}</h1>
            <p>Comprehensive analysis of {total} test cases</p>
        </div>
        <div class="summary">
            <div class="summary-grid">
                <div class="summary-card"><h3>Final Average Score</h3><div class="value">{final_avg:.1}/10</div></div>
                <div class="summary-card"><h3>Model Score</h3><div class="value">{model_avg:.1}/10</div></div>
                <div class="summary-card"><h3>Code Score</h3><div class="value">{code_avg:.1}/10</div></div>
                <div class="summary-card"><h3>Total Tests</h3><div class="value">{total}</div></div>
            </div>
            <div class="type-breakdown">{badges}</div>
        </div>
        <div class="results">{cases}
        </div>
        {footer}
    </div>
    <script>{SCRIPT}    </script>
</body>
</html>
"#,
            title = escape_html(&self.title),
            total = summary.total,
            final_avg = summary.average_final,
            model_avg = summary.average_model,
            code_avg = summary.average_code,
            badges = Self::render_type_badges(records),
        )
    }

    /// One badge per type, in order of first appearance.
    fn render_type_badges(records: &[EvaluationRecord]) -> String {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for record in records {
            let name = record.test_case.type_name();
            match counts.iter_mut().find(|(seen, _)| *seen == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }

        counts.iter().fold(String::new(), |mut html, (name, count)| {
            let _ = write!(
                html,
                r#"<span class="type-badge">{}: {}</span>"#,
                escape_html(name),
                count
            );
            html
        })
    }

    fn render_case(number: usize, record: &EvaluationRecord) -> String {
        let model = &record.model_evaluation;
        let code = &record.code_evaluation;

        format!(
            r#"
            <div class="test-case">
                <div class="test-header">
                    <span class="test-number">Test {number}</span>
                    <span class="test-type">{kind}</span>
                </div>
                <div class="task-description"><strong>Task:</strong> {task}</div>
                <div class="scores">
                    <div class="score-item final"><div class="score-value">{final_score}</div><div class="score-label">Final Score</div></div>
                    <div class="score-item"><div class="score-value">{model_score}</div><div class="score-label">Model Score</div></div>
                    <div class="score-item"><div class="score-value">{code_score}</div><div class="score-label">Code Score</div></div>
                </div>
                <div class="details">
                    <div class="detail-section"><h4>Model Reasoning</h4><p>{reasoning}</p></div>
                    <div class="detail-section"><h4>Code Validation</h4><p>{feedback}</p></div>
                    {strengths}{weaknesses}
                    <div class="output-section">
                        <button class="toggle-output" onclick="toggleOutput({number})">Toggle Output</button>
                        <div class="output-content" id="output-{number}">AI Output:
{output}</div>
                    </div>
                </div>
            </div>"#,
            kind = escape_html(record.test_case.type_name()),
            task = escape_html(&record.test_case.task),
            final_score = record.final_score,
            model_score = model.score,
            code_score = code.score,
            reasoning = escape_html(&model.reasoning),
            feedback = escape_html(&code.feedback),
            strengths = Self::render_list("Strengths", "strengths", &model.strengths),
            weaknesses = Self::render_list("Weaknesses", "weaknesses", &model.weaknesses),
            output = escape_html(&record.output),
        )
    }

    fn render_list(heading: &str, class: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let list: String = items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        format!(
            r#"<div class="detail-section"><h4>{heading}</h4><ul class="{class}">{list}</ul></div>"#
        )
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
