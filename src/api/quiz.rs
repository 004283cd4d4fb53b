//! Purpose: Define the immutable quiz domain objects produced by the mapper.
//! Exports: `QuizQuestion`, `QuizData`.
//! Role: Stable value objects handed to callers; `Serialize` feeds CLI JSON output only.
//! Invariants: Instances are constructed by the schema mapper and never mutated.
//! Invariants: `correct_index` is always in bounds for `options`.

use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct QuizQuestion {
    prompt: String,
    options: Vec<String>,
    #[serde(rename = "correctIndex")]
    correct_index: usize,
}

impl QuizQuestion {
    pub(crate) fn new(prompt: String, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            prompt,
            options,
            correct_index,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct QuizData {
    #[serde(rename = "quizId", skip_serializing_if = "Option::is_none")]
    quiz_id: Option<String>,
    topic: String,
    difficulty: String,
    #[serde(rename = "questionCount")]
    question_count: i64,
    questions: Vec<QuizQuestion>,
}

impl QuizData {
    pub(crate) fn new(
        quiz_id: Option<String>,
        topic: Option<String>,
        difficulty: Option<String>,
        question_count: i64,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Self {
            quiz_id,
            topic: topic.unwrap_or_default(),
            difficulty: difficulty.unwrap_or_else(|| "medium".to_string()),
            question_count,
            questions,
        }
    }

    pub fn quiz_id(&self) -> Option<&str> {
        self.quiz_id.as_deref()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn question_count(&self) -> i64 {
        self.question_count
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }
}
