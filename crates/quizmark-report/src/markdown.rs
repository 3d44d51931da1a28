//! Markdown report generator.

use std::path::Path;

use anyhow::Result;

use quizmark_core::analysis::{strengths_and_weaknesses, EligibilityGuidance, StrengthBand};
use quizmark_core::report::ScoredSession;

/// Markdown table cells cannot contain raw pipes or newlines.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn table(md: &mut String, title: &str, heading: &str, rows: Vec<(String, u32, u32, f64)>) {
    if rows.is_empty() {
        return;
    }
    md.push_str(&format!("### {title}\n\n"));
    md.push_str(&format!("| {heading} | Correct | Score |\n"));
    md.push_str("|---|---|---|\n");
    for (label, correct, total, pct) in rows {
        md.push_str(&format!(
            "| {} | {}/{} | {:.1}% |\n",
            cell(&label),
            correct,
            total,
            pct
        ));
    }
    md.push('\n');
}

/// Render a scored session as Markdown.
pub fn generate_markdown(session: &ScoredSession) -> String {
    let report = &session.report;
    let guidance = EligibilityGuidance::for_category(report.eligibility_category);
    let mut md = String::new();

    md.push_str(&format!("# Quiz results: {}\n\n", session.bank.name));
    md.push_str(&format!(
        "_Scored {}_\n\n",
        session.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "**Score:** {}/{} ({:.1}%)  \n**Estimated ability (weighted):** {:.1}%\n\n",
        report.correct_answers,
        report.total_questions,
        report.overall_percentage,
        report.estimated_ability_score
    ));

    md.push_str(&format!("## {}\n\n{}\n\n", guidance.title, guidance.description));
    for rec in guidance.recommendations {
        md.push_str(&format!("- {rec}\n"));
    }
    md.push('\n');

    let highlights = strengths_and_weaknesses(report);
    if !highlights.strengths.is_empty() {
        md.push_str("**Key strengths:** ");
        let names: Vec<String> = highlights
            .strengths
            .iter()
            .map(|d| format!("{} ({:.1}%)", d.name, d.percentage))
            .collect();
        md.push_str(&names.join(", "));
        md.push_str("\n\n");
    }
    if !highlights.improvement_areas.is_empty() {
        md.push_str("**Areas for improvement:** ");
        let names: Vec<String> = highlights
            .improvement_areas
            .iter()
            .map(|d| format!("{} ({:.1}%)", d.name, d.percentage))
            .collect();
        md.push_str(&names.join(", "));
        md.push_str("\n\n");
    }

    md.push_str("## Breakdown\n\n");
    md.push_str("### Domains\n\n| Domain | Correct | Score | Band |\n|---|---|---|---|\n");
    for d in &report.domain_results {
        md.push_str(&format!(
            "| {} | {}/{} | {:.1}% | {} |\n",
            cell(&d.name),
            d.correct,
            d.total,
            d.percentage,
            StrengthBand::from_percentage(d.percentage)
        ));
    }
    md.push('\n');

    table(
        &mut md,
        "Strands",
        "Strand",
        report
            .strand_results
            .iter()
            .map(|s| (format!("{} {}", s.id, s.name), s.correct, s.total, s.percentage))
            .collect(),
    );
    table(
        &mut md,
        "Career stages",
        "Stage",
        report
            .career_stage_results
            .iter()
            .map(|c| (c.stage.to_string(), c.correct, c.total, c.percentage))
            .collect(),
    );
    table(
        &mut md,
        "SOLO levels",
        "Level",
        report
            .solo_level_results
            .iter()
            .map(|s| (s.level.clone(), s.correct, s.total, s.percentage))
            .collect(),
    );
    table(
        &mut md,
        "Difficulty",
        "Category",
        report
            .difficulty_results
            .iter()
            .map(|d| (d.category.clone(), d.correct, d.total, d.percentage))
            .collect(),
    );

    md.push_str("## Answers\n\n| # | Question | Yours | Correct | |\n|---|---|---|---|---|\n");
    for a in &report.detailed_answers {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            a.id,
            cell(&a.question),
            cell(a.user_answer.as_deref().unwrap_or("-")),
            cell(&a.correct_answer),
            if a.is_correct { "OK" } else { "X" }
        ));
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(session: &ScoredSession, path: &Path) -> Result<()> {
    let md = generate_markdown(session);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_session;

    #[test]
    fn markdown_contains_summary_and_tables() {
        let md = generate_markdown(&make_session());
        assert!(md.starts_with("# Quiz results: Test Bank"));
        assert!(md.contains("2/3 (66.7%)"));
        assert!(md.contains("**Estimated ability (weighted):** 50.0%"));
        assert!(md.contains("## Category C: Needs Development"));
        assert!(md.contains("| Leading Strategically | 2/2 | 100.0% | Expert |"));
        assert!(md.contains("### SOLO levels"));
        assert!(md.contains("**Areas for improvement:** Managing Operations (0.0%)"));
    }

    #[test]
    fn markdown_lists_every_answer() {
        let session = make_session();
        let md = generate_markdown(&session);
        let answer_rows = md
            .lines()
            .skip_while(|l| !l.starts_with("## Answers"))
            .filter(|l| l.starts_with("| ") && !l.starts_with("| #"))
            .count();
        assert_eq!(answer_rows, session.report.detailed_answers.len());
    }

    #[test]
    fn markdown_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        write_markdown_report(&make_session(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("## Answers"));
    }
}
