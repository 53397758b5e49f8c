use crate::types::{CodeGradeResult, MergedScore, ModelGradeResult, ScoreBreakdown};

/// Weighted average of the judge score and the code score.
#[derive(Debug, Clone, Copy)]
pub struct ScoreMerger {
    weights: ScoreBreakdown,
}

impl Default for ScoreMerger {
    fn default() -> Self {
        Self::new(ScoreBreakdown {
            model_weight: 0.6,
            code_weight: 0.4,
        })
    }
}

impl ScoreMerger {
    pub fn new(weights: ScoreBreakdown) -> Self {
        Self { weights }
    }

    pub fn merge(&self, model: &ModelGradeResult, code: &CodeGradeResult) -> MergedScore {
        let weighted = model.score * self.weights.model_weight
            + f64::from(code.score) * self.weights.code_weight;

        MergedScore {
            final_score: round2(weighted),
            model_score: model.score,
            code_score: code.score,
            breakdown: self.weights,
        }
    }
}

/// Round half-way cases on the exact binary value, so `6.275` (stored as
/// `6.27499...`) becomes `6.27` rather than `6.28`.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
