//! quizmark-core — Question banks, answer stores and the scoring engine.
//!
//! This crate defines the quiz data model, the pure scoring engine that turns
//! a question list and an answer map into a [`report::QuizReport`], and the
//! collaborators around it: bank loading, answer persistence and the session
//! driver.

pub mod analysis;
pub mod bank;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod statistics;
pub mod store;

pub use engine::{score, ScoringEngine, ScoringPolicy};
pub use model::{AnswerMap, Question, QuestionBank};
pub use report::{EligibilityCategory, QuizReport};
