//! Core data model types for quizmark.
//!
//! These are the catalog types the rest of the system is built on: questions
//! and their classification tags, question banks, and the sparse answer map.
//! Field names serialize in camelCase so existing question bank files load
//! unchanged.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Question identifier, unique within a bank.
pub type QuestionId = u32;

/// Mapping from question id to the chosen option value.
///
/// Absence of an id means the question is unanswered.
pub type AnswerMap = BTreeMap<QuestionId, String>;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique positive identifier.
    pub id: QuestionId,
    /// The prompt shown to the user.
    pub text: String,
    /// Answer options, in display order.
    pub options: Vec<QuestionOption>,
    /// The `value` of the correct option.
    pub correct_answer: String,
    /// Competency domain.
    pub domain: Domain,
    /// Sub-strand within the domain.
    pub strand: Strand,
    /// Fine-grained indicator tag.
    pub indicator: Indicator,
    /// Ordinal career stage (1-4).
    pub career_stage: u32,
    /// SOLO taxonomy level name.
    pub solo_level: String,
    /// Item difficulty parameters.
    pub difficulty_params: DifficultyParams,
    /// Explanation shown alongside the answer.
    #[serde(default)]
    pub explanation: String,
    /// Free-text content tags.
    #[serde(default)]
    pub content_tags: Vec<String>,
}

impl Question {
    /// Returns the option with the given value, if any.
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Returns `true` if `answer` is exactly the correct option value.
    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        answer == Some(self.correct_answer.as_str())
    }
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Identity token, conventionally "A".."D".
    pub value: String,
    /// Display text.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strand {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: String,
    pub text: String,
}

/// Item difficulty parameters.
///
/// Only `category` participates in scoring; the remaining IRT-style
/// parameters are carried through for consumers that want them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Difficulty bucket name, e.g. "Easy".
    pub category: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub discrimination: f64,
    #[serde(default)]
    pub guessing: f64,
}

/// SOLO taxonomy levels, in increasing cognitive complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoloLevel {
    Unistructural,
    Multistructural,
    Relational,
    #[serde(rename = "Extended Abstract")]
    ExtendedAbstract,
}

impl SoloLevel {
    /// All levels in cognitive order.
    pub const ALL: [SoloLevel; 4] = [
        SoloLevel::Unistructural,
        SoloLevel::Multistructural,
        SoloLevel::Relational,
        SoloLevel::ExtendedAbstract,
    ];

    /// Canonical display name, as it appears in question banks.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoloLevel::Unistructural => "Unistructural",
            SoloLevel::Multistructural => "Multistructural",
            SoloLevel::Relational => "Relational",
            SoloLevel::ExtendedAbstract => "Extended Abstract",
        }
    }
}

impl fmt::Display for SoloLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoloLevel {
    type Err = String;

    /// Parses the canonical spelling only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoloLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown SOLO level: {s}"))
    }
}

/// Difficulty buckets, from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyCategory {
    Easy,
    Medium,
    Difficult,
}

impl DifficultyCategory {
    pub const ALL: [DifficultyCategory; 3] = [
        DifficultyCategory::Easy,
        DifficultyCategory::Medium,
        DifficultyCategory::Difficult,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyCategory::Easy => "Easy",
            DifficultyCategory::Medium => "Medium",
            DifficultyCategory::Difficult => "Difficult",
        }
    }

    /// Case-insensitive lookup, used for point weights.
    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyCategory::Easy),
            "medium" => Some(DifficultyCategory::Medium),
            "difficult" => Some(DifficultyCategory::Difficult),
            _ => None,
        }
    }
}

impl fmt::Display for DifficultyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyCategory {
    type Err = String;

    /// Parses the canonical spelling only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DifficultyCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown difficulty category: {s}"))
    }
}

/// A named collection of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Questions in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Look up a question by its 1-based position.
    pub fn by_number(&self, number: usize) -> Option<&Question> {
        number.checked_sub(1).and_then(|i| self.questions.get(i))
    }

    /// Look up a question by id.
    pub fn by_id(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a four-option question with the given classification.
    pub fn question(id: QuestionId, domain: u32, difficulty: &str, solo: &str) -> Question {
        Question {
            id,
            text: format!("Question {id}"),
            options: ["A", "B", "C", "D"]
                .iter()
                .map(|v| QuestionOption {
                    value: (*v).to_string(),
                    text: format!("Option {v}"),
                })
                .collect(),
            correct_answer: "A".into(),
            domain: Domain {
                id: domain,
                name: format!("Domain {domain}"),
            },
            strand: Strand {
                id: format!("{domain}.1"),
                name: format!("Strand {domain}.1"),
            },
            indicator: Indicator {
                id: format!("{domain}.1.{id}"),
                text: format!("Indicator for {id}"),
            },
            career_stage: (id % 4) + 1,
            solo_level: solo.into(),
            difficulty_params: DifficultyParams {
                category: difficulty.into(),
                value: 0.0,
                discrimination: 1.0,
                guessing: 0.25,
            },
            explanation: format!("Explanation {id}"),
            content_tags: vec!["leadership".into()],
        }
    }
}
