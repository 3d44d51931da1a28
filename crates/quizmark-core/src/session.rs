//! Quiz session driver.
//!
//! Owns the progression through a question list: which question is current,
//! saving answers as they are chosen, the completion gate, and producing the
//! report exactly once per attempt.

use crate::engine::ScoringEngine;
use crate::error::SessionError;
use crate::model::Question;
use crate::report::QuizReport;
use crate::statistics::percentage;
use crate::store::AnswerStore;

/// A single attempt at a question list, persisted through `S`.
pub struct QuizSession<'q, S> {
    questions: &'q [Question],
    store: S,
    engine: ScoringEngine,
    index: usize,
}

impl<'q, S: AnswerStore> QuizSession<'q, S> {
    /// Start at question 1.
    pub fn new(questions: &'q [Question], store: S, engine: ScoringEngine) -> Self {
        Self {
            questions,
            store,
            engine,
            index: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// 1-based number of the current question.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn current(&self) -> Option<&'q Question> {
        self.questions.get(self.index)
    }

    /// Jump to a 1-based question number.
    pub fn go_to(&mut self, number: usize) -> Result<&'q Question, SessionError> {
        let total = self.total();
        if total == 0 {
            return Err(SessionError::EmptyBank);
        }
        if number == 0 || number > total {
            return Err(SessionError::OutOfRange { number, total });
        }
        self.index = number - 1;
        Ok(&self.questions[self.index])
    }

    /// The saved answer for the current question.
    pub fn selected_answer(&self) -> Result<Option<String>, SessionError> {
        match self.current() {
            Some(q) => Ok(self.store.answer(q.id)?),
            None => Ok(None),
        }
    }

    /// Choose an answer for the current question, persisting it immediately.
    pub fn select(&mut self, value: &str) -> Result<(), SessionError> {
        let q = self.current().ok_or(SessionError::EmptyBank)?;
        self.store.set(q.id, value)?;
        tracing::debug!(question = q.id, value, "answer saved");
        Ok(())
    }

    /// Moving forward requires an answer for the current question.
    pub fn can_go_next(&self) -> Result<bool, SessionError> {
        Ok(self.selected_answer()?.is_some())
    }

    pub fn can_go_prev(&self) -> bool {
        self.index > 0
    }

    pub fn is_last(&self) -> bool {
        self.total() > 0 && self.index + 1 == self.total()
    }

    /// Advance one question. Returns `false` when already on the last one.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.total() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Step back one question. Returns `false` on the first one.
    pub fn prev(&mut self) -> bool {
        if self.can_go_prev() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Number of questions in this list that have a saved answer.
    pub fn answered_count(&self) -> Result<usize, SessionError> {
        let answers = self.store.get()?;
        Ok(self
            .questions
            .iter()
            .filter(|q| answers.contains_key(&q.id))
            .count())
    }

    /// First question (1-based) without a saved answer.
    pub fn first_unanswered(&self) -> Result<Option<usize>, SessionError> {
        let answers = self.store.get()?;
        Ok(self
            .questions
            .iter()
            .position(|q| !answers.contains_key(&q.id))
            .map(|i| i + 1))
    }

    pub fn is_complete(&self) -> Result<bool, SessionError> {
        Ok(self.answered_count()? == self.total())
    }

    /// Position through the list as a percentage, counting the current
    /// question as reached.
    pub fn progress_percentage(&self) -> f64 {
        percentage(self.number() as u32, self.total() as u32).min(100.0)
    }

    /// Score the answers saved so far without ending the attempt.
    pub fn live_report(&self) -> Result<QuizReport, SessionError> {
        let answers = self.store.get()?;
        Ok(self.engine.score(self.questions, &answers))
    }

    /// Score a completed attempt and clear the store.
    pub fn finish(&mut self) -> Result<QuizReport, SessionError> {
        let answers = self.store.get()?;
        let answered = self
            .questions
            .iter()
            .filter(|q| answers.contains_key(&q.id))
            .count();
        let total = self.total();
        if total == 0 {
            return Err(SessionError::EmptyBank);
        }
        if answered < total {
            return Err(SessionError::Incomplete { answered, total });
        }

        let report = self.engine.score(self.questions, &answers);
        self.store.clear()?;
        tracing::info!(
            correct = report.correct_answers,
            total = report.total_questions,
            category = %report.eligibility_category,
            "quiz finished, answers cleared"
        );
        Ok(report)
    }

    /// Discard all saved answers and return to question 1.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        self.index = 0;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
