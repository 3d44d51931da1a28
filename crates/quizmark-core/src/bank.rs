//! Question bank loading and validation.
//!
//! Banks load from JSON (either a bare array of questions or a full bank
//! object) or from TOML (`[bank]` header plus `[[questions]]` tables).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{DifficultyCategory, Question, QuestionBank, SoloLevel};

/// On-disk encodings a bank can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Json,
    Toml,
}

impl BankFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(BankFormat::Json),
            "toml" => Some(BankFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

/// Parse a single bank file, choosing the format by extension.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let format = BankFormat::from_path(path).with_context(|| {
        format!(
            "unsupported question bank extension (expected .json or .toml): {}",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, format, path)
}

/// Parse bank content held in memory.
///
/// `source_path` names the bank in error messages and, for bare JSON arrays,
/// supplies the bank id and name from the file stem.
pub fn parse_bank_str(content: &str, format: BankFormat, source_path: &Path) -> Result<QuestionBank> {
    match format {
        BankFormat::Json => {
            let context = || format!("failed to parse JSON: {}", source_path.display());
            // A bare question array or a bank object; pick by the opening
            // byte so serde reports the failing field and line.
            if content.trim_start().starts_with('[') {
                let questions: Vec<Question> =
                    serde_json::from_str(content).with_context(context)?;
                let stem = source_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("questions")
                    .to_string();
                Ok(QuestionBank {
                    id: stem.clone(),
                    name: stem,
                    description: String::new(),
                    questions,
                })
            } else {
                serde_json::from_str::<QuestionBank>(content).with_context(context)
            }
        }
        BankFormat::Toml => {
            let parsed: TomlBankFile = toml::from_str(content)
                .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
            Ok(QuestionBank {
                id: parsed.bank.id,
                name: parsed.bank.name,
                description: parsed.bank.description,
                questions: parsed.questions,
            })
        }
    }
}

/// Recursively load all `.json` and `.toml` banks from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if BankFormat::from_path(&path).is_some() {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a single file or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    pub message: String,
}

impl ValidationWarning {
    fn question(id: u32, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id),
            message: message.into(),
        }
    }
}

/// Validate a bank for data problems the scoring engine silently tolerates.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank has no questions".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    // strand id -> (strand name, domain id) of the first question seen
    let mut strands: HashMap<&str, (&str, u32)> = HashMap::new();

    for q in &bank.questions {
        if !seen_ids.insert(q.id) {
            warnings.push(ValidationWarning::question(
                q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
        if q.id == 0 {
            warnings.push(ValidationWarning::question(q.id, "question ID must be positive"));
        }
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning::question(q.id, "question text is empty"));
        }
        if q.options.len() < 2 {
            warnings.push(ValidationWarning::question(
                q.id,
                format!("only {} option(s); at least 2 expected", q.options.len()),
            ));
        }

        let mut values = HashSet::new();
        for o in &q.options {
            if !values.insert(o.value.as_str()) {
                warnings.push(ValidationWarning::question(
                    q.id,
                    format!("duplicate option value: {}", o.value),
                ));
            }
        }
        if q.option(&q.correct_answer).is_none() {
            warnings.push(ValidationWarning::question(
                q.id,
                format!(
                    "correct answer '{}' is not one of the options",
                    q.correct_answer
                ),
            ));
        }

        if q.career_stage == 0 {
            warnings.push(ValidationWarning::question(q.id, "career stage must be positive"));
        }
        if q.solo_level.parse::<SoloLevel>().is_err() {
            warnings.push(ValidationWarning::question(
                q.id,
                format!("unknown SOLO level '{}' will sort last", q.solo_level),
            ));
        }
        if q
            .difficulty_params
            .category
            .parse::<DifficultyCategory>()
            .is_err()
        {
            warnings.push(ValidationWarning::question(
                q.id,
                format!(
                    "unrecognized difficulty category '{}' will sort last",
                    q.difficulty_params.category
                ),
            ));
        }

        match strands.get(q.strand.id.as_str()) {
            Some(&(name, domain_id)) => {
                if name != q.strand.name || domain_id != q.domain.id {
                    warnings.push(ValidationWarning::question(
                        q.id,
                        format!(
                            "strand {} metadata differs from its first occurrence; \
                             reports will use '{}' in domain {}",
                            q.strand.id, name, domain_id
                        ),
                    ));
                }
            }
            None => {
                strands.insert(q.strand.id.as_str(), (q.strand.name.as_str(), q.domain.id));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::question;
    use std::path::PathBuf;

    const BARE_ARRAY: &str = r#"[
      {
        "id": 1,
        "text": "What anchors a school improvement plan?",
        "options": [
          {"value": "A", "text": "Learner data"},
          {"value": "B", "text": "Last year's budget"}
        ],
        "correctAnswer": "A",
        "domain": {"id": 1, "name": "Leading Strategically"},
        "strand": {"id": "1.1", "name": "Vision, mission and core values"},
        "indicator": {"id": "1.1.1", "text": "Uses data for planning"},
        "careerStage": 1,
        "soloLevel": "Unistructural",
        "difficultyParams": {"value": -0.5, "category": "Easy", "discrimination": 0.9, "guessing": 0.25},
        "explanation": "Plans start from evidence.",
        "contentTags": ["planning"]
      }
    ]"#;

    const VALID_TOML: &str = r#"
[bank]
id = "leadership"
name = "Leadership Basics"
description = "A tiny bank"

[[questions]]
id = 1
text = "Which practice best supports teacher growth?"
correctAnswer = "B"
careerStage = 2
soloLevel = "Relational"
explanation = "Coaching with feedback builds capacity."
contentTags = ["coaching"]
options = [
  { value = "A", text = "Annual memo" },
  { value = "B", text = "Coaching cycles" },
]
domain = { id = 2, name = "Managing School Operations" }
strand = { id = "2.1", name = "Records management" }
indicator = { id = "2.1.1", text = "Supports teachers" }
difficultyParams = { category = "Medium" }
"#;

    #[test]
    fn parse_bare_json_array_uses_file_stem() {
        let bank =
            parse_bank_str(BARE_ARRAY, BankFormat::Json, &PathBuf::from("ppssh.json")).unwrap();
        assert_eq!(bank.id, "ppssh");
        assert_eq!(bank.questions.len(), 1);
        assert_eq!(bank.questions[0].domain.name, "Leading Strategically");
    }

    #[test]
    fn json_errors_name_the_field_and_line() {
        let broken = BARE_ARRAY.replace("\"careerStage\": 1", "\"careerStage\": \"one\"");
        assert_ne!(broken, BARE_ARRAY);
        let err = parse_bank_str(&broken, BankFormat::Json, &PathBuf::from("ppssh.json"))
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to parse JSON: ppssh.json"), "{msg}");
        assert!(msg.contains("line"), "{msg}");
        assert!(!msg.contains("untagged"), "{msg}");

        let object = format!(r#"{{"id": "obj", "name": 7, "questions": {BARE_ARRAY}}}"#);
        let err = parse_bank_str(&object, BankFormat::Json, &PathBuf::from("x.json")).unwrap_err();
        assert!(format!("{err:#}").contains("line"));
    }

    #[test]
    fn parse_json_bank_object() {
        let json = format!(
            r#"{{"id": "obj", "name": "Object Bank", "questions": {BARE_ARRAY}}}"#
        );
        let bank = parse_bank_str(&json, BankFormat::Json, &PathBuf::from("x.json")).unwrap();
        assert_eq!(bank.id, "obj");
        assert_eq!(bank.name, "Object Bank");
        assert_eq!(bank.questions.len(), 1);
    }

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, BankFormat::Toml, &PathBuf::from("b.toml")).unwrap();
        assert_eq!(bank.id, "leadership");
        assert_eq!(bank.questions.len(), 1);
        let q = &bank.questions[0];
        assert_eq!(q.correct_answer, "B");
        assert_eq!(q.difficulty_params.category, "Medium");
        assert_eq!(q.difficulty_params.discrimination, 0.0);
        assert!(validate_bank(&bank).is_empty());
    }

    #[test]
    fn parse_malformed_input() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, BankFormat::Toml, &PathBuf::from("bad.toml")).is_err());
        assert!(parse_bank_str(bad, BankFormat::Json, &PathBuf::from("bad.json")).is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = parse_bank(&PathBuf::from("questions.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn validate_reports_data_problems() {
        let mut dup = question(1, 1, "Easy", "Relational");
        dup.correct_answer = "Z".into();
        let mut odd = question(1, 1, "Impossible", "Prestructural");
        odd.career_stage = 0;
        odd.strand.name = "Different".into();

        let bank = QuestionBank {
            id: "bad".into(),
            name: "Bad".into(),
            description: String::new(),
            questions: vec![dup, odd],
        };
        let messages: Vec<String> = validate_bank(&bank).into_iter().map(|w| w.message).collect();

        assert!(messages.iter().any(|m| m.contains("duplicate question ID")));
        assert!(messages.iter().any(|m| m.contains("not one of the options")));
        assert!(messages.iter().any(|m| m.contains("career stage")));
        assert!(messages.iter().any(|m| m.contains("SOLO level")));
        assert!(messages.iter().any(|m| m.contains("difficulty category")));
        assert!(messages.iter().any(|m| m.contains("differs from its first occurrence")));
    }

    #[test]
    fn validate_empty_bank() {
        let bank = QuestionBank {
            id: "empty".into(),
            name: "Empty".into(),
            description: String::new(),
            questions: vec![],
        };
        let warnings = validate_bank(&bank);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].question_id.is_none());
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("b.json"), BARE_ARRAY).unwrap();
        std::fs::write(dir.path().join("broken.json"), "[{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        let ids: Vec<&str> = banks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["leadership", "b"]);
    }
}
