//! Grading of model output.
//!
//! Two independent channels score each output: [`CodeGrader`] checks that
//! the artifact parses, [`ModelGrader`] asks a judge model for a review.
//! [`ScoreMerger`] folds both into the final weighted score.

pub mod code;
pub mod merge;
pub mod model;

pub use code::CodeGrader;
pub use merge::ScoreMerger;
pub use model::{parse_judgment, Judgment, ModelGrader};
