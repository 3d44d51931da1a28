pub mod answer;
pub mod compare;
pub mod init;
pub mod reset;
pub mod score;
pub mod show;
pub mod status;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizmark_core::bank::parse_bank;
use quizmark_core::config::{load_config_from, QuizmarkConfig};
use quizmark_core::session::QuizSession;
use quizmark_core::store::JsonFileStore;
use quizmark_core::{QuestionBank, ScoringEngine};

/// Everything a session-driving command needs: config, the bank and the answer file.
pub(crate) struct Workspace {
    pub config: QuizmarkConfig,
    pub bank: QuestionBank,
}

impl Workspace {
    pub fn load(config_path: Option<&Path>, bank: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let bank_path = bank_path(bank, &config)?;
        let bank = parse_bank(&bank_path)?;
        Ok(Self { config, bank })
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.config.answers_path.clone())
    }

    pub fn session(&self) -> QuizSession<'_, JsonFileStore> {
        QuizSession::new(
            &self.bank.questions,
            self.store(),
            ScoringEngine::new(self.config.policy.clone()),
        )
    }
}

/// `--bank` wins over `question_bank` from config.
pub(crate) fn bank_path(bank: Option<PathBuf>, config: &QuizmarkConfig) -> Result<PathBuf> {
    bank.or_else(|| config.question_bank.clone())
        .context("no question bank given; pass --bank or set question_bank in quizmark.toml")
}
