//! quizmark-report — Renders scored sessions as Markdown or self-contained HTML.

pub mod html;
pub mod markdown;

pub use html::{generate_html, write_html_report};
pub use markdown::{generate_markdown, write_markdown_report};

#[cfg(test)]
pub(crate) mod test_support {
    use quizmark_core::engine::ScoringPolicy;
    use quizmark_core::model::{
        AnswerMap, DifficultyParams, Domain, Indicator, Question, QuestionBank, QuestionOption,
        Strand,
    };
    use quizmark_core::report::ScoredSession;

    fn question(id: u32, domain: u32, domain_name: &str, difficulty: &str) -> Question {
        Question {
            id,
            text: format!("Question <{id}> & more"),
            options: vec![
                QuestionOption {
                    value: "A".into(),
                    text: "First".into(),
                },
                QuestionOption {
                    value: "B".into(),
                    text: "Second".into(),
                },
            ],
            correct_answer: "A".into(),
            domain: Domain {
                id: domain,
                name: domain_name.into(),
            },
            strand: Strand {
                id: format!("{domain}.1"),
                name: format!("{domain_name} strand"),
            },
            indicator: Indicator {
                id: format!("{domain}.1.1"),
                text: "Indicator".into(),
            },
            career_stage: 1,
            solo_level: "Relational".into(),
            difficulty_params: DifficultyParams {
                category: difficulty.into(),
                value: 0.0,
                discrimination: 1.0,
                guessing: 0.25,
            },
            explanation: "Because A.".into(),
            content_tags: vec!["tag".into()],
        }
    }

    /// Two domains: "Leading Strategically" all right, "Managing Operations" all wrong.
    pub fn make_session() -> ScoredSession {
        let bank = QuestionBank {
            id: "test-bank".into(),
            name: "Test Bank".into(),
            description: String::new(),
            questions: vec![
                question(1, 1, "Leading Strategically", "Easy"),
                question(2, 1, "Leading Strategically", "Medium"),
                question(3, 2, "Managing Operations", "Difficult"),
            ],
        };
        let mut answers = AnswerMap::new();
        answers.insert(1, "A".into());
        answers.insert(2, "A".into());
        answers.insert(3, "B".into());
        let report = quizmark_core::score(&bank.questions, &answers);
        ScoredSession::new(&bank, ScoringPolicy::default(), report)
    }
}
