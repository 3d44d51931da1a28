//! The `quizmark status` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::statistics::percentage;

use super::Workspace;

pub fn execute(config: Option<PathBuf>, bank: Option<PathBuf>, live: bool) -> Result<()> {
    let ws = Workspace::load(config.as_deref(), bank)?;
    let session = ws.session();
    let answered = session.answered_count()?;
    let total = session.total();

    println!("Bank: {} ({} questions)", ws.bank.name, total);
    println!(
        "Answered: {answered}/{total} ({:.1}%)",
        percentage(answered as u32, total as u32)
    );
    match session.first_unanswered()? {
        Some(n) => println!("Next unanswered: question {n}"),
        None if total > 0 => println!("Complete. Run `quizmark score` to see your results."),
        None => {}
    }

    if live {
        let report = session.live_report()?;
        println!(
            "Live score: {}/{} correct ({:.1}%), ability {:.1}%, category {}",
            report.correct_answers,
            report.total_questions,
            report.overall_percentage,
            report.estimated_ability_score,
            report.eligibility_category
        );
    }
    Ok(())
}
