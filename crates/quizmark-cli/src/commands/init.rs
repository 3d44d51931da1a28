//! The `quizmark init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("quizmark.toml").exists() {
        println!("quizmark.toml already exists, skipping.");
    } else {
        std::fs::write("quizmark.toml", SAMPLE_CONFIG)?;
        println!("Created quizmark.toml");
    }

    std::fs::create_dir_all("question-banks")?;
    let example_path = Path::new("question-banks/example.json");
    if example_path.exists() {
        println!("question-banks/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizmark validate");
    println!("  2. Run: quizmark show --question 1");
    println!("  3. Run: quizmark answer --question 1 --value A");
    println!("  4. Run: quizmark score --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

question_bank = "question-banks/example.json"
answers_path = ".quizmark/answers.json"
output_dir = "./quizmark-results"

[policy]
category_a_threshold = 85.0
category_b_threshold = 70.0

[policy.weights]
easy = 1
medium = 2
difficult = 3
fallback = 1
"#;

const EXAMPLE_BANK: &str = r#"{
  "id": "example",
  "name": "Example Bank",
  "description": "A small PPSSH practice bank to get started",
  "questions": [
    {
      "id": 1,
      "text": "Which document should guide the school's annual implementation plan?",
      "options": [
        { "value": "A", "text": "The School Improvement Plan" },
        { "value": "B", "text": "The previous year's canteen report" },
        { "value": "C", "text": "A teacher's personal lesson log" }
      ],
      "correctAnswer": "A",
      "domain": { "id": 1, "name": "Leading Strategically" },
      "strand": { "id": "1.2", "name": "School planning and implementation" },
      "indicator": { "id": "1.2.1", "text": "Develops and implements school plans" },
      "careerStage": 1,
      "soloLevel": "Unistructural",
      "difficultyParams": { "category": "Easy", "value": -1.0, "discrimination": 1.0, "guessing": 0.33 },
      "explanation": "The SIP sets the priority improvement areas that the AIP operationalizes.",
      "contentTags": ["planning"]
    },
    {
      "id": 2,
      "text": "MOOE funds were used for an unplanned purchase. What should the school head do?",
      "options": [
        { "value": "A", "text": "Ignore it since the amount is small" },
        { "value": "B", "text": "Document the variance and realign the budget through proper procedures" },
        { "value": "C", "text": "Stop all MOOE spending for the year" }
      ],
      "correctAnswer": "B",
      "domain": { "id": 2, "name": "Managing School Operations and Resources" },
      "strand": { "id": "2.2", "name": "Financial management" },
      "indicator": { "id": "2.2.1", "text": "Manages finances according to policies" },
      "careerStage": 2,
      "soloLevel": "Relational",
      "difficultyParams": { "category": "Medium", "value": 0.0, "discrimination": 1.0, "guessing": 0.33 },
      "explanation": "Transparent documentation and realignment follow financial management rules.",
      "contentTags": ["finance"]
    },
    {
      "id": 3,
      "text": "Learners in a fishing community struggle with abstract measurement tasks. Which response is most appropriate?",
      "options": [
        { "value": "A", "text": "Skip the measurement competencies" },
        { "value": "B", "text": "Contextualize the lessons using local fishing practices" },
        { "value": "C", "text": "Assign more worksheets" }
      ],
      "correctAnswer": "B",
      "domain": { "id": 3, "name": "Focusing on Teaching and Learning" },
      "strand": { "id": "3.1", "name": "School-based review, contextualization and implementation of learning standards" },
      "indicator": { "id": "3.1.1", "text": "Contextualizes learning standards" },
      "careerStage": 3,
      "soloLevel": "Extended Abstract",
      "difficultyParams": { "category": "Difficult", "value": 1.2, "discrimination": 1.0, "guessing": 0.33 },
      "explanation": "Contextualization connects standards to the learners' lived experience.",
      "contentTags": ["curriculum"]
    }
  ]
}
"#;
