//! Quiz report types, scored-session archives and retake comparison.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ScoringPolicy;
use crate::model::{QuestionBank, QuestionId};

/// Eligibility classification derived from the weighted ability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EligibilityCategory {
    A,
    B,
    C,
}

impl fmt::Display for EligibilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityCategory::A => write!(f, "A"),
            EligibilityCategory::B => write!(f, "B"),
            EligibilityCategory::C => write!(f, "C"),
        }
    }
}

/// The complete result of scoring one answer map against a question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReport {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub overall_percentage: f64,
    /// Ascending by domain id.
    pub domain_results: Vec<DomainResult>,
    /// Ascending by strand id.
    pub strand_results: Vec<StrandResult>,
    /// Ascending by career stage.
    pub career_stage_results: Vec<CareerStageResult>,
    /// In SOLO order, unknown levels last.
    pub solo_level_results: Vec<SoloLevelResult>,
    /// Easy, Medium, Difficult, unknown categories last.
    pub difficulty_results: Vec<DifficultyResult>,
    /// One entry per question, in input order.
    pub detailed_answers: Vec<DetailedAnswer>,
    /// Difficulty-weighted percentage.
    pub estimated_ability_score: f64,
    pub eligibility_category: EligibilityCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResult {
    pub id: u32,
    pub name: String,
    pub total: u32,
    pub correct: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrandResult {
    pub id: String,
    pub name: String,
    pub domain_id: u32,
    pub domain_name: String,
    pub total: u32,
    pub correct: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStageResult {
    pub stage: u32,
    pub total: u32,
    pub correct: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoloLevelResult {
    pub level: String,
    pub total: u32,
    pub correct: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyResult {
    pub category: String,
    pub total: u32,
    pub correct: u32,
    pub percentage: f64,
}

/// Per-question outcome with its classification tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnswer {
    pub id: QuestionId,
    pub question: String,
    /// `None` when the question was not answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
    pub domain: String,
    pub strand: String,
    pub indicator: String,
    pub career_stage: u32,
    pub solo_level: String,
    #[serde(default)]
    pub content_tags: Vec<String>,
    pub difficulty: String,
}

/// Summary of a question bank (without the questions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl From<&QuestionBank> for BankSummary {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            question_count: bank.questions.len(),
        }
    }
}

/// An archived report: the deterministic [`QuizReport`] plus identity and
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSession {
    /// Unique archive identifier.
    pub id: Uuid,
    /// When the session was scored.
    pub created_at: DateTime<Utc>,
    pub bank: BankSummary,
    /// Policy the report was scored with.
    pub policy: ScoringPolicy,
    pub report: QuizReport,
}

impl ScoredSession {
    /// Wrap a freshly produced report.
    pub fn new(bank: &QuestionBank, policy: ScoringPolicy, report: QuizReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary::from(bank),
            policy,
            report,
        }
    }

    /// Save the session as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a session from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let session: ScoredSession =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(session)
    }

    /// Compare this session against an earlier attempt, domain by domain.
    ///
    /// `threshold` is in percentage points; smaller movements count as
    /// unchanged.
    pub fn compare(&self, baseline: &ScoredSession, threshold: f64) -> ComparisonReport {
        let by_id = |report: &QuizReport| -> BTreeMap<u32, (String, f64)> {
            report
                .domain_results
                .iter()
                .map(|d| (d.id, (d.name.clone(), d.percentage)))
                .collect()
        };

        let baseline_domains = by_id(&baseline.report);
        let current_domains = by_id(&self.report);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_domains = 0usize;

        for (id, (name, current)) in &current_domains {
            let Some((_, baseline_pct)) = baseline_domains.get(id) else {
                new_domains += 1;
                continue;
            };
            let delta = current - baseline_pct;
            let change = DomainChange {
                domain_id: *id,
                domain_name: name.clone(),
                baseline_percentage: *baseline_pct,
                current_percentage: *current,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_domains = baseline_domains
            .keys()
            .filter(|k| !current_domains.contains_key(k))
            .count();

        ComparisonReport {
            overall_delta: self.report.overall_percentage - baseline.report.overall_percentage,
            ability_delta: self.report.estimated_ability_score
                - baseline.report.estimated_ability_score,
            baseline_category: baseline.report.eligibility_category,
            current_category: self.report.eligibility_category,
            regressions,
            improvements,
            unchanged,
            new_domains,
            removed_domains,
        }
    }
}

/// Result of comparing two scored sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Change in overall percentage, in points.
    pub overall_delta: f64,
    /// Change in weighted ability score, in points.
    pub ability_delta: f64,
    pub baseline_category: EligibilityCategory,
    pub current_category: EligibilityCategory,
    /// Domains whose percentage went down.
    pub regressions: Vec<DomainChange>,
    /// Domains whose percentage went up.
    pub improvements: Vec<DomainChange>,
    pub unchanged: usize,
    /// Domains in current but not baseline.
    pub new_domains: usize,
    /// Domains in baseline but not current.
    pub removed_domains: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainChange {
    pub domain_id: u32,
    pub domain_name: String,
    pub baseline_percentage: f64,
    pub current_percentage: f64,
    pub delta: f64,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** overall {:+.1} pts, ability {:+.1} pts, category {} -> {}\n\n",
            self.overall_delta, self.ability_delta, self.baseline_category, self.current_category
        ));
        md.push_str(&format!(
            "{} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Domain | Baseline | Current | Delta |\n");
            md.push_str("|--------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:+.1} |\n",
                    c.domain_name, c.baseline_percentage, c.current_percentage, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }

    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::score;
    use crate::model::fixtures::question;
    use crate::model::{AnswerMap, Question};

    fn bank() -> QuestionBank {
        QuestionBank {
            id: "test".into(),
            name: "Test".into(),
            description: String::new(),
            questions: vec![
                question(1, 1, "Easy", "Relational"),
                question(2, 1, "Easy", "Relational"),
                question(3, 2, "Medium", "Relational"),
                question(4, 2, "Medium", "Relational"),
            ],
        }
    }

    fn scored(bank: &QuestionBank, correct_ids: &[u32]) -> ScoredSession {
        let answers: AnswerMap = bank
            .questions
            .iter()
            .map(|q: &Question| {
                let value = if correct_ids.contains(&q.id) { "A" } else { "B" };
                (q.id, value.to_string())
            })
            .collect();
        let report = score(&bank.questions, &answers);
        ScoredSession::new(bank, ScoringPolicy::default(), report)
    }

    #[test]
    fn compare_identical_sessions() {
        let bank = bank();
        let a = scored(&bank, &[1, 3]);
        let b = scored(&bank, &[1, 3]);

        let cmp = b.compare(&a, 0.5);
        assert!(cmp.regressions.is_empty());
        assert!(cmp.improvements.is_empty());
        assert_eq!(cmp.unchanged, 2);
        assert_eq!(cmp.overall_delta, 0.0);
    }

    #[test]
    fn compare_detects_regression_and_improvement() {
        let bank = bank();
        let baseline = scored(&bank, &[1, 2]);
        let current = scored(&bank, &[3, 4]);

        let cmp = current.compare(&baseline, 5.0);
        assert_eq!(cmp.regressions.len(), 1);
        assert_eq!(cmp.regressions[0].domain_id, 1);
        assert_eq!(cmp.regressions[0].delta, -100.0);
        assert_eq!(cmp.improvements.len(), 1);
        assert_eq!(cmp.improvements[0].domain_id, 2);
        assert!(cmp.has_regressions());
        // Medium questions carry more weight.
        assert!(cmp.ability_delta > 0.0);
    }

    #[test]
    fn compare_counts_new_and_removed_domains() {
        let mut old_bank = bank();
        old_bank.questions.truncate(2);
        let mut new_bank = bank();
        new_bank.questions.drain(..2);

        let baseline = scored(&old_bank, &[1]);
        let current = scored(&new_bank, &[3]);
        let cmp = current.compare(&baseline, 1.0);
        assert_eq!(cmp.new_domains, 1);
        assert_eq!(cmp.removed_domains, 1);
    }

    #[test]
    fn json_roundtrip() {
        let bank = bank();
        let session = scored(&bank, &[1, 2, 3]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        session.save_json(&path).unwrap();
        let loaded = ScoredSession::load_json(&path).unwrap();

        assert_eq!(loaded.id, session.id);
        assert_eq!(loaded.bank.question_count, 4);
        assert_eq!(loaded.report, session.report);
    }

    #[test]
    fn report_serializes_camel_case() {
        let bank = bank();
        let report = score(&bank.questions, &AnswerMap::new());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("estimatedAbilityScore").is_some());
        assert_eq!(json["eligibilityCategory"], "C");
        assert!(json["detailedAnswers"][0].get("userAnswer").is_none());
        assert_eq!(json["strandResults"][0]["domainId"], 1);
    }

    #[test]
    fn markdown_output() {
        let bank = bank();
        let baseline = scored(&bank, &[1, 2, 3, 4]);
        let current = scored(&bank, &[3, 4]);

        let md = current.compare(&baseline, 0.5).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("Domain 1"));
        assert!(md.contains("A -> C"));
    }
}
