//! The `quizmark show` command.

use std::path::PathBuf;

use anyhow::Result;

use super::Workspace;

pub fn execute(config: Option<PathBuf>, bank: Option<PathBuf>, number: usize) -> Result<()> {
    let ws = Workspace::load(config.as_deref(), bank)?;
    let mut session = ws.session();
    let question = session.go_to(number)?;
    let selected = session.selected_answer()?;

    println!(
        "Question {} of {} [{} | {} | {}]",
        session.number(),
        session.total(),
        question.domain.name,
        question.difficulty_params.category,
        question.solo_level
    );
    println!();
    println!("{}", question.text);
    println!();
    for option in &question.options {
        let marker = if selected.as_deref() == Some(option.value.as_str()) {
            "*"
        } else {
            " "
        };
        println!(" {marker} {}. {}", option.value, option.text);
    }

    if selected.is_none() {
        println!("\nNot answered yet.");
    }
    Ok(())
}
