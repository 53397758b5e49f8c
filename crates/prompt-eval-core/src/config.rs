//! Configuration for prompt-eval
//!
//! Settings are read from TOML. Resolution order:
//! 1. An explicit `--config` path (must exist)
//! 2. `prompt-eval.toml` in the working directory
//! 3. `config.toml` in `$PROMPT_EVAL_CONFIG_DIR` or `~/.config/prompt-eval/`
//! 4. Built-in defaults
//!
//! Every field has a default, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EvalError, Result};
use crate::types::ScoreBreakdown;

pub const LOCAL_CONFIG_FILE: &str = "prompt-eval.toml";
const CONFIG_DIR: &str = "prompt-eval";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "PROMPT_EVAL_CONFIG_DIR";

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-0";
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub judge: JudgeConfig,
    pub scoring: ScoringConfig,
    pub paths: PathsConfig,
}

/// The model under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub system: String,
    /// Echo tokens to the console as they arrive
    pub stream: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            max_tokens: 200,
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            stream: false,
        }
    }
}

/// The judge model. Unset `name` means "same model as the one under test".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub max_tokens: u32,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            name: None,
            max_tokens: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub model_weight: f64,
    pub code_weight: f64,
    /// Code score for a test case whose type cannot be validated
    pub unknown_type_score: u8,
    /// Model score when the judge reply cannot be parsed
    pub judge_fallback_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            model_weight: 0.6,
            code_weight: 0.4,
            unknown_type_score: 5,
            judge_fallback_score: 1.0,
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            model_weight: self.model_weight,
            code_weight: self.code_weight,
        }
    }

    /// Weights must be non-negative and sum to 1.0 (within 0.01).
    pub fn validate(&self) -> Result<()> {
        if self.model_weight < 0.0 || self.code_weight < 0.0 {
            return Err(EvalError::invalid_value(
                "scoring weights",
                format!("{} / {}", self.model_weight, self.code_weight),
            ));
        }

        let total = self.model_weight + self.code_weight;
        if (total - 1.0).abs() > 0.01 {
            return Err(EvalError::invalid_value(
                "scoring weights",
                format!("must sum to 1.0, got {}", total),
            ));
        }

        if self.unknown_type_score > 10 {
            return Err(EvalError::invalid_value(
                "unknown_type_score",
                self.unknown_type_score,
            ));
        }

        if !(1.0..=10.0).contains(&self.judge_fallback_score) {
            return Err(EvalError::invalid_value(
                "judge_fallback_score",
                self.judge_fallback_score,
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub dataset: PathBuf,
    pub results: PathBuf,
    pub report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("dataset.json"),
            results: PathBuf::from("evaluation_results.json"),
            report: PathBuf::from("evaluation_report.html"),
        }
    }
}

impl Config {
    /// Load configuration from a file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EvalError::Other(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.scoring.validate()?;

        tracing::debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// Resolve configuration following the documented search order.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(EvalError::not_found("config file", path.display()));
            }
            return Self::load(path);
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load(&global);
            }
        }

        Ok(Self::default())
    }

    /// Serialize to pretty TOML, e.g. for writing a starter config
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EvalError::Other(format!("failed to serialize config: {}", e)))
    }

    /// Judge model name, falling back to the model under test
    pub fn judge_model(&self) -> &str {
        self.judge.name.as_deref().unwrap_or(&self.model.name)
    }

    fn global_config_path() -> Option<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = match std::env::var(CONFIG_DIR_ENV_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()?.join(CONFIG_DIR),
        };

        Some(config_dir.join(CONFIG_FILE))
    }
}
