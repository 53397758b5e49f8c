//! prompt-eval core library
//!
//! Grading and evaluation logic for the prompt-eval CLI: content extraction,
//! syntax validation, LLM-as-judge grading, score merging, the evaluation
//! runner, report rendering and the chat API client they all sit on.

pub mod chat;
pub mod config;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod grading;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;
