//! Interpretation of a scored report for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::report::{DomainResult, EligibilityCategory, QuizReport};

/// Domains at or above this percentage are listed as strengths.
pub const STRENGTH_THRESHOLD: f64 = 80.0;
/// Domains below this percentage are listed as improvement areas.
pub const IMPROVEMENT_THRESHOLD: f64 = 70.0;

/// What an eligibility category means and what to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityGuidance {
    pub category: EligibilityCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

impl EligibilityGuidance {
    pub fn for_category(category: EligibilityCategory) -> Self {
        match category {
            EligibilityCategory::A => Self {
                category,
                title: "Category A: Eligible",
                description: "You are ELIGIBLE to proceed to the next stage in the selection \
                              process for Principal 1 positions.",
                recommendations: &[
                    "Prepare for and proceed to the next stage of the selection process.",
                ],
            },
            EligibilityCategory::B => Self {
                category,
                title: "Category B: Conditional Eligibility",
                description: "You MAY TAKE the next NQESH examination, but this is contingent \
                              upon participation in coaching and mentoring. You may also be \
                              prioritized for OIC/TIC roles if needed.",
                recommendations: &[
                    "Actively participate in coaching and mentoring sessions with an experienced Principal.",
                    "Focus on strengthening areas identified in the domain/strand analysis.",
                    "Prepare for the next NQESH examination following mentorship.",
                    "Be prepared for potential designation as OIC/TIC if applicable.",
                ],
            },
            EligibilityCategory::C => Self {
                category,
                title: "Category C: Needs Development",
                description: "You MUST UNDERTAKE an intensive School Heads Development Program \
                              (SHDP) before retaking the NQESH.",
                recommendations: &[
                    "Enroll and diligently complete the required SHDP through NEAP or an authorized provider.",
                    "Focus on building foundational knowledge and skills across all PPSSH domains.",
                    "Reflect on feedback received during the SHDP.",
                    "Retake the NQESH only after successful completion of the SHDP.",
                ],
            },
        }
    }
}

/// Competency band for a single domain percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthBand {
    Emerging,
    Developing,
    Proficient,
    Expert,
}

impl StrengthBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            StrengthBand::Expert
        } else if percentage >= 80.0 {
            StrengthBand::Proficient
        } else if percentage >= 70.0 {
            StrengthBand::Developing
        } else {
            StrengthBand::Emerging
        }
    }
}

impl fmt::Display for StrengthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthBand::Emerging => "Emerging",
            StrengthBand::Developing => "Developing",
            StrengthBand::Proficient => "Proficient",
            StrengthBand::Expert => "Expert",
        };
        f.write_str(label)
    }
}

/// Strong and weak domains, each best-first or worst-first respectively.
#[derive(Debug, Clone, Default)]
pub struct DomainHighlights<'r> {
    pub strengths: Vec<&'r DomainResult>,
    pub improvement_areas: Vec<&'r DomainResult>,
}

/// Split a report's domains into strengths (>= 80%) and improvement areas
/// (< 70%). Domains in between appear in neither list.
pub fn strengths_and_weaknesses(report: &QuizReport) -> DomainHighlights<'_> {
    let mut strengths: Vec<&DomainResult> = report
        .domain_results
        .iter()
        .filter(|d| d.percentage >= STRENGTH_THRESHOLD)
        .collect();
    strengths.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    let mut improvement_areas: Vec<&DomainResult> = report
        .domain_results
        .iter()
        .filter(|d| d.percentage < IMPROVEMENT_THRESHOLD)
        .collect();
    improvement_areas.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));

    DomainHighlights {
        strengths,
        improvement_areas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::score;
    use crate::model::fixtures::question;
    use crate::model::{AnswerMap, Question};

    #[test]
    fn guidance_matches_category() {
        let a = EligibilityGuidance::for_category(EligibilityCategory::A);
        assert!(a.title.contains("Eligible"));
        assert_eq!(a.recommendations.len(), 1);

        let c = EligibilityGuidance::for_category(EligibilityCategory::C);
        assert!(c.description.contains("SHDP"));
        assert_eq!(c.recommendations.len(), 4);
    }

    #[test]
    fn strength_band_boundaries() {
        assert_eq!(StrengthBand::from_percentage(100.0), StrengthBand::Expert);
        assert_eq!(StrengthBand::from_percentage(90.0), StrengthBand::Expert);
        assert_eq!(StrengthBand::from_percentage(89.9), StrengthBand::Proficient);
        assert_eq!(StrengthBand::from_percentage(80.0), StrengthBand::Proficient);
        assert_eq!(StrengthBand::from_percentage(70.0), StrengthBand::Developing);
        assert_eq!(StrengthBand::from_percentage(69.9), StrengthBand::Emerging);
        assert_eq!(StrengthBand::Developing.to_string(), "Developing");
    }

    #[test]
    fn highlights_split_domains() {
        // Domain 1: 2/2, domain 2: 0/2, domain 3: 3/4 (75%, neither list).
        let questions: Vec<Question> = vec![
            question(1, 1, "Easy", "Relational"),
            question(2, 1, "Easy", "Relational"),
            question(3, 2, "Easy", "Relational"),
            question(4, 2, "Easy", "Relational"),
            question(5, 3, "Easy", "Relational"),
            question(6, 3, "Easy", "Relational"),
            question(7, 3, "Easy", "Relational"),
            question(8, 3, "Easy", "Relational"),
        ];
        let answers: AnswerMap = [1, 2, 5, 6, 7]
            .into_iter()
            .map(|id| (id, "A".to_string()))
            .collect();
        let report = score(&questions, &answers);

        let highlights = strengths_and_weaknesses(&report);
        let strong: Vec<u32> = highlights.strengths.iter().map(|d| d.id).collect();
        let weak: Vec<u32> = highlights.improvement_areas.iter().map(|d| d.id).collect();
        assert_eq!(strong, vec![1]);
        assert_eq!(weak, vec![2]);
    }
}
