//! Answer persistence.
//!
//! The scoring engine never touches persistence; callers fetch an
//! [`AnswerMap`] from an [`AnswerStore`], score it, and decide when to clear.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;
use crate::model::{AnswerMap, QuestionId};

/// A key-value store of answers, keyed by question id.
pub trait AnswerStore {
    /// All saved answers.
    fn get(&self) -> Result<AnswerMap, StoreError>;

    /// Save (or overwrite) the answer for one question.
    fn set(&self, question_id: QuestionId, value: &str) -> Result<(), StoreError>;

    /// Remove every saved answer.
    fn clear(&self) -> Result<(), StoreError>;

    /// The saved answer for one question.
    fn answer(&self, question_id: QuestionId) -> Result<Option<String>, StoreError> {
        Ok(self.get()?.remove(&question_id))
    }
}

impl<S: AnswerStore + ?Sized> AnswerStore for &S {
    fn get(&self) -> Result<AnswerMap, StoreError> {
        (**self).get()
    }

    fn set(&self, question_id: QuestionId, value: &str) -> Result<(), StoreError> {
        (**self).set(question_id, value)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    answers: Mutex<AnswerMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing answer map.
    pub fn with_answers(answers: AnswerMap) -> Self {
        Self {
            answers: Mutex::new(answers),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AnswerMap> {
        // A poisoned map is still a valid map.
        self.answers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AnswerStore for MemoryStore {
    fn get(&self) -> Result<AnswerMap, StoreError> {
        Ok(self.lock().clone())
    }

    fn set(&self, question_id: QuestionId, value: &str) -> Result<(), StoreError> {
        self.lock().insert(question_id, value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.lock().clear();
        Ok(())
    }
}

/// Answers kept in a single JSON object file, `{"<id>": "<value>", ...}`.
///
/// A missing file reads as no answers. A file that cannot be parsed is
/// logged and also reads as no answers, so one bad write never locks a user
/// out of a new attempt.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write(&self, answers: &AnswerMap) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(answers)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

impl AnswerStore for JsonFileStore {
    fn get(&self) -> Result<AnswerMap, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AnswerMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        match serde_json::from_str::<AnswerMap>(&content) {
            Ok(answers) => Ok(answers),
            Err(e) => {
                tracing::warn!(
                    "ignoring unreadable answer file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(AnswerMap::new())
            }
        }
    }

    fn set(&self, question_id: QuestionId, value: &str) -> Result<(), StoreError> {
        let mut answers = self.get()?;
        answers.insert(question_id, value.to_string());
        self.write(&answers)
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
