//! Error types and exit codes for prompt-eval
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, HTTP, API errors)
//! - 2: Usage error (bad flags/args, missing credentials)
//! - 3: Data error (missing or malformed dataset/results files)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing or malformed input files (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during prompt-eval operations
#[derive(Error, Debug)]
pub enum EvalError {
    // Usage errors (exit code 2)
    #[error("API key not found: set ANTHROPIC_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("invalid dataset {path:?}: {reason}")]
    InvalidDataset { path: PathBuf, reason: String },

    #[error("invalid results file {path:?}: {reason}")]
    InvalidResults { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

impl EvalError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        EvalError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        EvalError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            EvalError::MissingApiKey
            | EvalError::UsageError(_)
            | EvalError::InvalidValue { .. } => ExitCode::Usage,

            EvalError::NotFound { .. }
            | EvalError::InvalidDataset { .. }
            | EvalError::InvalidResults { .. } => ExitCode::Data,

            EvalError::Io(_)
            | EvalError::Json(_)
            | EvalError::Toml(_)
            | EvalError::Http(_)
            | EvalError::Api { .. }
            | EvalError::InvalidResponse(_)
            | EvalError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            EvalError::MissingApiKey => "missing_api_key",
            EvalError::UsageError(_) => "usage_error",
            EvalError::InvalidValue { .. } => "invalid_value",
            EvalError::NotFound { .. } => "not_found",
            EvalError::InvalidDataset { .. } => "invalid_dataset",
            EvalError::InvalidResults { .. } => "invalid_results",
            EvalError::Io(_) => "io_error",
            EvalError::Json(_) => "json_error",
            EvalError::Toml(_) => "toml_error",
            EvalError::Http(_) => "http_error",
            EvalError::Api { .. } => "api_error",
            EvalError::InvalidResponse(_) => "invalid_response",
            EvalError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for prompt-eval operations
pub type Result<T> = std::result::Result<T, EvalError>;
