//! The `quizmark compare` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::report::ScoredSession;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        threshold.is_finite() && threshold >= 0.0,
        "threshold must be a non-negative number of percentage points"
    );
    let baseline = ScoredSession::load_json(&baseline_path)?;
    let current = ScoredSession::load_json(&current_path)?;

    if baseline.bank.id != current.bank.id {
        tracing::warn!(
            baseline = %baseline.bank.id,
            current = %current.bank.id,
            "comparing sessions from different question banks"
        );
    }

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );
            println!(
                "Overall {:+.1} pts, ability {:+.1} pts, category {} -> {}",
                report.overall_delta,
                report.ability_delta,
                report.baseline_category,
                report.current_category
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1})",
                        r.domain_name, r.baseline_percentage, r.current_percentage, r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1})",
                        i.domain_name, i.baseline_percentage, i.current_percentage, i.delta
                    );
                }
            }

            if report.new_domains > 0 {
                println!("\n{} new domain(s)", report.new_domains);
            }
            if report.removed_domains > 0 {
                println!("{} removed domain(s)", report.removed_domains);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
