//! The `quizmark validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::bank::{load_banks, validate_bank};
use quizmark_core::config::load_config_from;

use super::bank_path;

pub fn execute(config: Option<PathBuf>, bank: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let path = bank_path(bank, &config)?;
    let banks = load_banks(&path)?;

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Bank: {} ({} questions)", bank.name, bank.questions.len());

        let warnings = validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
