//! End-to-end pipeline tests: answer → score → archive → compare.
//!
//! Two attempts at the sample bank are scored into separate output
//! directories and the archives are compared in every output format.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE_BANK: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../question-banks/sample.json"
);

const CORRECT: [&str; 10] = ["A", "B", "C", "B", "B", "B", "B", "C", "B", "B"];

fn quizmark(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizmark").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("QUIZMARK_ANSWERS", dir.path().join("answers.json"))
        .env_remove("RUST_LOG");
    cmd
}

/// Answer every question, then score into `out`. Returns the archive path.
fn attempt(dir: &TempDir, answers: &[&str], out: &str) -> PathBuf {
    for (i, value) in answers.iter().enumerate() {
        quizmark(dir)
            .args(["answer", "--bank", SAMPLE_BANK])
            .args(["--question", &(i + 1).to_string(), "--value", value])
            .assert()
            .success();
    }

    quizmark(dir)
        .args(["score", "--bank", SAMPLE_BANK, "--output", out])
        .assert()
        .success();

    find_archive(&dir.path().join(out))
}

fn find_archive(out: &Path) -> PathBuf {
    std::fs::read_dir(out)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.extension().is_some_and(|x| x == "json"))
        .expect("score should write a JSON archive")
}

/// First two questions (both in "Leading Strategically") answered wrong.
fn weaker_answers() -> Vec<&'static str> {
    let mut answers = CORRECT.to_vec();
    answers[0] = "B";
    answers[1] = "A";
    answers
}

#[test]
fn e2e_archive_contents() {
    let dir = TempDir::new().unwrap();
    let archive = attempt(&dir, &CORRECT, "first");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&archive).unwrap()).unwrap();

    assert_eq!(json["bank"]["id"], "sample");
    assert_eq!(json["bank"]["question_count"], 10);
    assert_eq!(json["report"]["totalQuestions"], 10);
    assert_eq!(json["report"]["correctAnswers"], 10);
    assert_eq!(json["report"]["eligibilityCategory"], "A");
    assert_eq!(json["report"]["domainResults"].as_array().unwrap().len(), 5);
    assert_eq!(json["report"]["detailedAnswers"].as_array().unwrap().len(), 10);
    assert_eq!(json["policy"]["category_a_threshold"], 85.0);

    // Scoring a complete attempt starts the next one from scratch.
    quizmark(&dir)
        .args(["status", "--bank", SAMPLE_BANK])
        .assert()
        .success()
        .stdout(predicate::str::contains("Answered: 0/10"));
}

#[test]
fn e2e_weaker_attempt_drops_category() {
    let dir = TempDir::new().unwrap();
    let archive = attempt(&dir, &weaker_answers(), "second");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&archive).unwrap()).unwrap();

    // 16 of 19 weighted points is 84.2%, just under the A threshold.
    assert_eq!(json["report"]["correctAnswers"], 8);
    assert_eq!(json["report"]["eligibilityCategory"], "B");
    assert_eq!(json["report"]["domainResults"][0]["percentage"], 0.0);
}

#[test]
fn e2e_compare_text() {
    let dir = TempDir::new().unwrap();
    let baseline = attempt(&dir, &CORRECT, "first");
    let current = attempt(&dir, &weaker_answers(), "second");

    quizmark(&dir)
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Comparison: 1 regressions, 0 improvements, 4 unchanged",
        ))
        .stdout(predicate::str::contains("category A -> B"))
        .stdout(predicate::str::contains(
            "Leading Strategically 100.0% -> 0.0% (-100.0)",
        ));

    quizmark(&dir)
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .arg("--fail-on-regression")
        .assert()
        .code(1);
}

#[test]
fn e2e_compare_json_and_markdown() {
    let dir = TempDir::new().unwrap();
    let baseline = attempt(&dir, &weaker_answers(), "first");
    let current = attempt(&dir, &CORRECT, "second");

    let output = quizmark(&dir)
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .args(["--format", "json", "--fail-on-regression"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["regressions"].as_array().unwrap().len(), 0);
    assert_eq!(json["improvements"][0]["domain_name"], "Leading Strategically");
    assert_eq!(json["improvements"][0]["delta"], 100.0);
    assert_eq!(json["overall_delta"], 20.0);
    assert_eq!(json["current_category"], "A");

    quizmark(&dir)
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .args(["--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Improvements"))
        .stdout(predicate::str::contains("category B -> A"));
}

#[test]
fn e2e_compare_threshold_absorbs_small_changes() {
    let dir = TempDir::new().unwrap();
    let baseline = attempt(&dir, &CORRECT, "first");
    let current = attempt(&dir, &weaker_answers(), "second");

    quizmark(&dir)
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .args(["--threshold", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Comparison: 0 regressions, 0 improvements, 5 unchanged",
        ));
}
