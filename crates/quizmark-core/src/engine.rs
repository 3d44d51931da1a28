//! The scoring engine.
//!
//! Turns a question list and a sparse answer map into a [`QuizReport`]. The
//! engine is a pure transform: it performs no I/O, reads no clock and never
//! fails. Missing answers, answers outside a question's options, unknown
//! difficulty or SOLO names and empty question lists all produce a valid
//! report.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, DifficultyCategory, Question};
use crate::report::{
    CareerStageResult, DetailedAnswer, DifficultyResult, DomainResult, EligibilityCategory,
    QuizReport, SoloLevelResult, StrandResult,
};
use crate::statistics::{difficulty_rank, percentage, solo_rank, Buckets};

/// Minimum weighted score for category A.
pub const CATEGORY_A_THRESHOLD: f64 = 85.0;
/// Minimum weighted score for category B.
pub const CATEGORY_B_THRESHOLD: f64 = 70.0;

pub const EASY_POINTS: u32 = 1;
pub const MEDIUM_POINTS: u32 = 2;
pub const DIFFICULT_POINTS: u32 = 3;
/// Points for a category that is not recognized.
pub const FALLBACK_POINTS: u32 = 1;

/// Point weight per difficulty category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyWeights {
    #[serde(default = "default_easy")]
    pub easy: u32,
    #[serde(default = "default_medium")]
    pub medium: u32,
    #[serde(default = "default_difficult")]
    pub difficult: u32,
    #[serde(default = "default_fallback")]
    pub fallback: u32,
}

fn default_easy() -> u32 {
    EASY_POINTS
}
fn default_medium() -> u32 {
    MEDIUM_POINTS
}
fn default_difficult() -> u32 {
    DIFFICULT_POINTS
}
fn default_fallback() -> u32 {
    FALLBACK_POINTS
}

impl Default for DifficultyWeights {
    fn default() -> Self {
        Self {
            easy: EASY_POINTS,
            medium: MEDIUM_POINTS,
            difficult: DIFFICULT_POINTS,
            fallback: FALLBACK_POINTS,
        }
    }
}

impl DifficultyWeights {
    /// Points for a category name, matched case-insensitively.
    pub fn points(&self, category: &str) -> u32 {
        match DifficultyCategory::parse_loose(category) {
            Some(DifficultyCategory::Easy) => self.easy,
            Some(DifficultyCategory::Medium) => self.medium,
            Some(DifficultyCategory::Difficult) => self.difficult,
            None => self.fallback,
        }
    }
}

/// Eligibility cutoffs and difficulty weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default = "default_a_threshold")]
    pub category_a_threshold: f64,
    #[serde(default = "default_b_threshold")]
    pub category_b_threshold: f64,
    #[serde(default)]
    pub weights: DifficultyWeights,
}

fn default_a_threshold() -> f64 {
    CATEGORY_A_THRESHOLD
}
fn default_b_threshold() -> f64 {
    CATEGORY_B_THRESHOLD
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            category_a_threshold: CATEGORY_A_THRESHOLD,
            category_b_threshold: CATEGORY_B_THRESHOLD,
            weights: DifficultyWeights::default(),
        }
    }
}

impl ScoringPolicy {
    /// Classify a weighted ability score, checking the highest band first.
    pub fn classify(&self, ability_score: f64) -> EligibilityCategory {
        if ability_score >= self.category_a_threshold {
            EligibilityCategory::A
        } else if ability_score >= self.category_b_threshold {
            EligibilityCategory::B
        } else {
            EligibilityCategory::C
        }
    }

    /// Reject policies that cannot classify consistently.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.category_a_threshold.is_finite() && self.category_b_threshold.is_finite(),
            "eligibility thresholds must be finite numbers"
        );
        anyhow::ensure!(
            self.category_b_threshold <= self.category_a_threshold,
            "category B threshold ({}) must not exceed category A threshold ({})",
            self.category_b_threshold,
            self.category_a_threshold
        );
        Ok(())
    }
}

/// The scoring engine, parameterized by a [`ScoringPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    policy: ScoringPolicy,
}

struct DomainMeta {
    name: String,
}

struct StrandMeta {
    name: String,
    domain_id: u32,
    domain_name: String,
}

impl ScoringEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score `questions` against `answers`.
    pub fn score(&self, questions: &[Question], answers: &AnswerMap) -> QuizReport {
        let mut domains: Buckets<u32, DomainMeta> = Buckets::new();
        let mut strands: Buckets<String, StrandMeta> = Buckets::new();
        let mut stages: Buckets<u32, ()> = Buckets::new();
        let mut solo_levels: Buckets<String, ()> = Buckets::new();
        let mut difficulties: Buckets<String, ()> = Buckets::new();

        let mut correct_count = 0u32;
        let mut earned_points = 0u64;
        let mut possible_points = 0u64;
        let mut detailed_answers = Vec::with_capacity(questions.len());

        for q in questions {
            let user_answer = answers.get(&q.id);
            let is_correct = q.is_correct(user_answer.map(String::as_str));
            if is_correct {
                correct_count += 1;
            }

            let points = u64::from(self.policy.weights.points(&q.difficulty_params.category));
            possible_points += points;
            if is_correct {
                earned_points += points;
            }

            domains.record(q.domain.id, is_correct, || DomainMeta {
                name: q.domain.name.clone(),
            });
            strands.record(q.strand.id.clone(), is_correct, || StrandMeta {
                name: q.strand.name.clone(),
                domain_id: q.domain.id,
                domain_name: q.domain.name.clone(),
            });
            stages.record(q.career_stage, is_correct, || ());
            solo_levels.record(q.solo_level.clone(), is_correct, || ());
            difficulties.record(q.difficulty_params.category.clone(), is_correct, || ());

            detailed_answers.push(DetailedAnswer {
                id: q.id,
                question: q.text.clone(),
                user_answer: user_answer.cloned(),
                correct_answer: q.correct_answer.clone(),
                is_correct,
                explanation: q.explanation.clone(),
                domain: q.domain.name.clone(),
                strand: q.strand.name.clone(),
                indicator: q.indicator.text.clone(),
                career_stage: q.career_stage,
                solo_level: q.solo_level.clone(),
                content_tags: q.content_tags.clone(),
                difficulty: q.difficulty_params.category.clone(),
            });
        }

        let mut domain_results: Vec<DomainResult> = domains
            .into_buckets()
            .into_iter()
            .map(|b| DomainResult {
                id: b.key,
                name: b.meta.name,
                total: b.tally.total,
                correct: b.tally.correct,
                percentage: b.tally.percentage(),
            })
            .collect();
        domain_results.sort_by_key(|d| d.id);

        let mut strand_results: Vec<StrandResult> = strands
            .into_buckets()
            .into_iter()
            .map(|b| StrandResult {
                id: b.key,
                name: b.meta.name,
                domain_id: b.meta.domain_id,
                domain_name: b.meta.domain_name,
                total: b.tally.total,
                correct: b.tally.correct,
                percentage: b.tally.percentage(),
            })
            .collect();
        strand_results.sort_by(|a, b| a.id.cmp(&b.id));

        let mut career_stage_results: Vec<CareerStageResult> = stages
            .into_buckets()
            .into_iter()
            .map(|b| CareerStageResult {
                stage: b.key,
                total: b.tally.total,
                correct: b.tally.correct,
                percentage: b.tally.percentage(),
            })
            .collect();
        career_stage_results.sort_by_key(|s| s.stage);

        let mut solo_level_results: Vec<SoloLevelResult> = solo_levels
            .into_buckets()
            .into_iter()
            .map(|b| SoloLevelResult {
                level: b.key,
                total: b.tally.total,
                correct: b.tally.correct,
                percentage: b.tally.percentage(),
            })
            .collect();
        // Stable: unknown levels keep first-seen order behind the known ones.
        solo_level_results.sort_by_key(|s| solo_rank(&s.level));

        let mut difficulty_results: Vec<DifficultyResult> = difficulties
            .into_buckets()
            .into_iter()
            .map(|b| DifficultyResult {
                category: b.key,
                total: b.tally.total,
                correct: b.tally.correct,
                percentage: b.tally.percentage(),
            })
            .collect();
        difficulty_results.sort_by_key(|d| difficulty_rank(&d.category));

        let estimated_ability_score = if possible_points > 0 {
            earned_points as f64 / possible_points as f64 * 100.0
        } else {
            0.0
        };
        let total_questions = questions.len() as u32;
        let eligibility_category = self.policy.classify(estimated_ability_score);
        tracing::debug!(
            total_questions,
            correct = correct_count,
            earned_points,
            possible_points,
            category = %eligibility_category,
            "scored"
        );

        QuizReport {
            total_questions,
            correct_answers: correct_count,
            overall_percentage: percentage(correct_count, total_questions),
            domain_results,
            strand_results,
            career_stage_results,
            solo_level_results,
            difficulty_results,
            detailed_answers,
            estimated_ability_score,
            eligibility_category,
        }
    }
}

/// Score with the default policy.
pub fn score(questions: &[Question], answers: &AnswerMap) -> QuizReport {
    ScoringEngine::default().score(questions, answers)
}
