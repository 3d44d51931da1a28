//! The `quizmark reset` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::config::load_config_from;
use quizmark_core::store::{AnswerStore, JsonFileStore};

pub fn execute(config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let store = JsonFileStore::new(config.answers_path);
    store.clear()?;
    println!("Cleared saved answers ({})", store.path().display());
    Ok(())
}
