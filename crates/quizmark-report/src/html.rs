//! HTML report generator.
//!
//! One self-contained page per scored session: styles and the answer filter
//! script are inlined so the file can be opened or mailed on its own.

use anyhow::Result;
use std::path::Path;

use quizmark_core::analysis::{strengths_and_weaknesses, EligibilityGuidance, StrengthBand};
use quizmark_core::report::{DomainResult, EligibilityCategory, ScoredSession};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// One `<tr>` for a `{label, total, correct, percentage}` row.
fn bucket_row(label: &str, correct: u32, total: u32, percentage: f64) -> String {
    format!(
        "<tr><td>{}</td><td>{}/{}</td><td>{:.1}%</td></tr>\n",
        html_escape(label),
        correct,
        total,
        percentage
    )
}

fn bucket_table(html: &mut String, title: &str, heading: &str, rows: &[String]) {
    if rows.is_empty() {
        return;
    }
    html.push_str(&format!("<h3>{title}</h3>\n"));
    html.push_str("<table>\n");
    html.push_str(&format!(
        "<thead><tr><th>{heading}</th><th>Correct</th><th>Score</th></tr></thead>\n"
    ));
    html.push_str("<tbody>\n");
    for row in rows {
        html.push_str(row);
    }
    html.push_str("</tbody></table>\n");
}

/// Generate an HTML report from a scored session.
pub fn generate_html(session: &ScoredSession) -> String {
    let report = &session.report;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizmark results — {}</title>\n",
        html_escape(&session.bank.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Quiz results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Bank: <strong>{}</strong> | {} questions | {}</p>\n",
        html_escape(&session.bank.name),
        report.total_questions,
        session.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary and eligibility
    let guidance = EligibilityGuidance::for_category(report.eligibility_category);
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p class=\"score\">{}/{} correct ({:.1}%)</p>\n",
        report.correct_answers, report.total_questions, report.overall_percentage
    ));
    html.push_str(&format!(
        "<div class=\"eligibility cat-{}\">\n<h3>{}</h3>\n<p>{}</p>\n",
        category_class(report.eligibility_category),
        html_escape(guidance.title),
        html_escape(guidance.description)
    ));
    html.push_str(&format!(
        "<p>Estimated ability score (weighted by difficulty): <strong>{:.1}%</strong></p>\n",
        report.estimated_ability_score
    ));
    html.push_str("<ul>\n");
    for rec in guidance.recommendations {
        html.push_str(&format!("<li>{}</li>\n", html_escape(rec)));
    }
    html.push_str("</ul>\n</div>\n");

    if !report.domain_results.is_empty() {
        html.push_str(&generate_bar_chart(&report.domain_results));
    }

    let highlights = strengths_and_weaknesses(report);
    html.push_str("<div class=\"highlights\">\n<h3>Key strengths</h3>\n<ul>\n");
    if highlights.strengths.is_empty() {
        html.push_str("<li>Keep practicing to identify key strengths!</li>\n");
    }
    for d in &highlights.strengths {
        html.push_str(&format!(
            "<li>{:.1}% {}</li>\n",
            d.percentage,
            html_escape(&d.name)
        ));
    }
    html.push_str("</ul>\n<h3>Areas for improvement</h3>\n<ul>\n");
    if highlights.improvement_areas.is_empty() {
        html.push_str("<li>No domains below 70%.</li>\n");
    }
    for d in &highlights.improvement_areas {
        html.push_str(&format!(
            "<li>{:.1}% {}</li>\n",
            d.percentage,
            html_escape(&d.name)
        ));
    }
    html.push_str("</ul>\n</div>\n");
    html.push_str("</section>\n");

    // Breakdown tables
    html.push_str("<section class=\"breakdown\">\n");
    html.push_str("<h2>Breakdown</h2>\n");

    html.push_str("<h3>Domains</h3>\n<table>\n");
    html.push_str("<thead><tr><th>Domain</th><th>Correct</th><th>Score</th><th>Band</th></tr></thead>\n<tbody>\n");
    for d in &report.domain_results {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}/{}</td><td>{:.1}%</td><td>{}</td></tr>\n",
            html_escape(&d.name),
            d.correct,
            d.total,
            d.percentage,
            StrengthBand::from_percentage(d.percentage)
        ));
    }
    html.push_str("</tbody></table>\n");

    let strands: Vec<String> = report
        .strand_results
        .iter()
        .map(|s| {
            bucket_row(
                &format!("{} {} ({})", s.id, s.name, s.domain_name),
                s.correct,
                s.total,
                s.percentage,
            )
        })
        .collect();
    bucket_table(&mut html, "Strands", "Strand", &strands);

    let stages: Vec<String> = report
        .career_stage_results
        .iter()
        .map(|c| bucket_row(&format!("Stage {}", c.stage), c.correct, c.total, c.percentage))
        .collect();
    bucket_table(&mut html, "Career stages", "Stage", &stages);

    let levels: Vec<String> = report
        .solo_level_results
        .iter()
        .map(|s| bucket_row(&s.level, s.correct, s.total, s.percentage))
        .collect();
    bucket_table(&mut html, "SOLO levels", "Level", &levels);

    let difficulties: Vec<String> = report
        .difficulty_results
        .iter()
        .map(|d| bucket_row(&d.category, d.correct, d.total, d.percentage))
        .collect();
    bucket_table(&mut html, "Difficulty", "Category", &difficulties);
    html.push_str("</section>\n");

    // Detailed answers
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str(
        "<label><input type=\"checkbox\" id=\"missed-toggle\"> Show incorrect answers only</label>\n",
    );
    html.push_str("<table id=\"results\">\n");
    html.push_str("<thead><tr><th>#</th><th>Question</th><th>Yours</th><th>Correct</th><th>Domain</th><th>Difficulty</th><th>Explanation</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for a in &report.detailed_answers {
        let class = if a.is_correct { "pass" } else { "fail" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            a.id,
            html_escape(&a.question),
            html_escape(a.user_answer.as_deref().unwrap_or("-")),
            html_escape(&a.correct_answer),
            html_escape(&a.domain),
            html_escape(&a.difficulty),
            html_escape(&a.explanation),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Session archive (JSON)</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(session)
            .unwrap_or_default()
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(session: &ScoredSession, path: &Path) -> Result<()> {
    let html = generate_html(session);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn category_class(category: EligibilityCategory) -> &'static str {
    match category {
        EligibilityCategory::A => "a",
        EligibilityCategory::B => "b",
        EligibilityCategory::C => "c",
    }
}

fn generate_bar_chart(domains: &[DomainResult]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 260;

    let total_height = domains.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, domain) in domains.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (domain.percentage / 100.0 * max_width as f64) as usize;

        let color = match StrengthBand::from_percentage(domain.percentage) {
            StrengthBand::Expert => "#22c55e",
            StrengthBand::Proficient => "#3b82f6",
            StrengthBand::Developing => "#eab308",
            StrengthBand::Emerging => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&domain.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            domain.percentage
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --ink: #1f2937; --paper: #fafaf9; --rule: #d6d3d1; --ok: #d1fae5; --miss: #fee2e2; --accent: #0f766e; }
@media (prefers-color-scheme: dark) {
  :root { --ink: #e7e5e4; --paper: #1c1917; --rule: #44403c; --ok: #14532d; --miss: #7f1d1d; --accent: #5eead4; }
}
body { font-family: system-ui, sans-serif; max-width: 72rem; margin: 0 auto; padding: 1.5rem; background: var(--paper); color: var(--ink); line-height: 1.5; }
header { border-bottom: 3px solid var(--accent); }
.meta { opacity: 0.7; }
.score { font-size: 1.75rem; font-weight: 700; color: var(--accent); }
.eligibility { border-left: 6px solid; padding: 0.25rem 1rem; margin: 1rem 0; }
.cat-a { border-color: #16a34a; }
.cat-b { border-color: #ca8a04; }
.cat-c { border-color: #dc2626; }
.highlights ul { columns: 2; }
table { border-collapse: collapse; width: 100%; margin: 0.75rem 0 1.5rem; }
th, td { border-bottom: 1px solid var(--rule); padding: 0.4rem 0.75rem; text-align: left; vertical-align: top; }
th { font-weight: 600; }
tr.pass { background: var(--ok); }
tr.fail { background: var(--miss); }
.only-missed tr.pass { display: none; }
pre { overflow-x: auto; padding: 1rem; border: 1px solid var(--rule); }
summary { cursor: pointer; }
"#;

const JS: &str = r#"
document.getElementById('missed-toggle').addEventListener('change', function (e) {
  document.getElementById('results').classList.toggle('only-missed', e.target.checked);
});
"#;
