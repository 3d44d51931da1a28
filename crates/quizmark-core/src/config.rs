//! quizmark configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::ScoringPolicy;

/// Environment variable that overrides the answer file location.
pub const ANSWERS_ENV: &str = "QUIZMARK_ANSWERS";

/// Top-level quizmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizmarkConfig {
    /// Default question bank for commands that take `--bank`.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
    /// Where saved answers live between commands.
    #[serde(default = "default_answers_path")]
    pub answers_path: PathBuf,
    /// Output directory for scored reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Eligibility thresholds and difficulty weights.
    #[serde(default)]
    pub policy: ScoringPolicy,
}

fn default_answers_path() -> PathBuf {
    PathBuf::from(".quizmark/answers.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizmark-results")
}

impl Default for QuizmarkConfig {
    fn default() -> Self {
        Self {
            question_bank: None,
            answers_path: default_answers_path(),
            output_dir: default_output_dir(),
            policy: ScoringPolicy::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizmark.toml` in the current directory
/// 2. `~/.config/quizmark/config.toml`
///
/// `QUIZMARK_ANSWERS` overrides `answers_path`.
pub fn load_config() -> Result<QuizmarkConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmark.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizmarkConfig::default(),
    };

    if let Ok(answers) = std::env::var(ANSWERS_ENV) {
        config.answers_path = PathBuf::from(answers);
    }

    tracing::debug!(?config_path, ?config, "configuration loaded");
    Ok(config)
}

/// Parse config TOML, expand `${VAR}` in paths and check the policy.
pub fn parse_config(content: &str) -> Result<QuizmarkConfig> {
    let mut config: QuizmarkConfig = toml::from_str(content)?;
    config.question_bank = config.question_bank.as_deref().map(resolve_path);
    config.answers_path = resolve_path(&config.answers_path);
    config.output_dir = resolve_path(&config.output_dir);
    config.policy.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmark"))
}
