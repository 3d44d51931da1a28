//! The `quizmark answer` command.

use std::path::PathBuf;

use anyhow::Result;

use super::Workspace;

pub fn execute(
    config: Option<PathBuf>,
    bank: Option<PathBuf>,
    number: usize,
    value: String,
) -> Result<()> {
    let ws = Workspace::load(config.as_deref(), bank)?;
    let mut session = ws.session();
    let question = session.go_to(number)?;

    if question.option(&value).is_none() {
        let valid: Vec<&str> = question.options.iter().map(|o| o.value.as_str()).collect();
        anyhow::bail!(
            "'{value}' is not an option for question {number}. Valid options: {}",
            valid.join(", ")
        );
    }

    session.select(&value)?;
    let answered = session.answered_count()?;
    println!(
        "Saved answer {value} for question {number} ({answered}/{} answered)",
        session.total()
    );

    if session.is_last() {
        if let Some(next) = session.first_unanswered()? {
            println!("Question {next} is still unanswered.");
        } else {
            println!("All questions answered. Run `quizmark score` to see your results.");
        }
    }
    Ok(())
}
