//! The `quizmark score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizmark_core::analysis::{EligibilityGuidance, StrengthBand};
use quizmark_core::error::SessionError;
use quizmark_core::report::ScoredSession;
use quizmark_core::store::AnswerStore;
use quizmark_core::QuizReport;
use quizmark_report::{write_html_report, write_markdown_report};

use super::Workspace;

/// Report formats `--format` accepts; `all` expands to every one.
const FORMATS: [&str; 3] = ["json", "html", "markdown"];

fn parse_formats(format: &str) -> Result<Vec<&'static str>> {
    if format.trim() == "all" {
        return Ok(FORMATS.to_vec());
    }
    let mut formats = Vec::new();
    for name in format.split(',').map(str::trim) {
        let canonical = match name {
            "json" => "json",
            "html" => "html",
            "markdown" | "md" => "markdown",
            other => anyhow::bail!(
                "unknown format '{other}' (expected one of: json, html, markdown, all)"
            ),
        };
        if !formats.contains(&canonical) {
            formats.push(canonical);
        }
    }
    Ok(formats)
}

pub fn execute(
    config: Option<PathBuf>,
    bank: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    allow_incomplete: bool,
    keep_answers: bool,
) -> Result<()> {
    let formats = parse_formats(&format)?;
    let ws = Workspace::load(config.as_deref(), bank)?;
    let session = ws.session();

    let total = session.total();
    anyhow::ensure!(total > 0, SessionError::EmptyBank);
    let answered = session.answered_count()?;

    if answered < total && !allow_incomplete {
        return Err(anyhow::Error::new(SessionError::Incomplete { answered, total })
            .context("pass --allow-incomplete to score anyway"));
    }

    let report = session.live_report()?;
    print_summary(&report);

    let scored = ScoredSession::new(&ws.bank, ws.config.policy.clone(), report);
    let output = output.unwrap_or_else(|| ws.config.output_dir.clone());
    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;
    let timestamp = scored.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("session-{timestamp}.json"));
                scored.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("session-{timestamp}.html"));
                write_html_report(&scored, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                let path = output.join(format!("session-{timestamp}.md"));
                write_markdown_report(&scored, &path)?;
                eprintln!("Markdown report: {}", path.display());
            }
        }
    }

    // Answers go only once every report is on disk.
    if keep_answers {
        eprintln!("Answers kept; run `quizmark reset` to start over.");
    } else {
        session.store().clear()?;
        tracing::info!(
            correct = scored.report.correct_answers,
            total = scored.report.total_questions,
            category = %scored.report.eligibility_category,
            "session scored, answers cleared"
        );
    }

    Ok(())
}

fn print_summary(report: &QuizReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Domain", "Correct", "Score", "Band"]);

    for d in &report.domain_results {
        table.add_row(vec![
            Cell::new(&d.name),
            Cell::new(format!("{}/{}", d.correct, d.total)),
            Cell::new(format!("{:.1}%", d.percentage)),
            Cell::new(StrengthBand::from_percentage(d.percentage)),
        ]);
    }

    let guidance = EligibilityGuidance::for_category(report.eligibility_category);
    println!("{table}");
    println!(
        "Overall: {}/{} correct ({:.1}%)",
        report.correct_answers, report.total_questions, report.overall_percentage
    );
    println!("Estimated ability: {:.1}%", report.estimated_ability_score);
    println!("{}", guidance.title);
}
