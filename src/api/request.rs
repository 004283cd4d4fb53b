//! Purpose: Sanitize request parameters and encode the outbound request body.
//! Exports: `QuizRequest`.
//! Role: Purpose-built encoder for the fixed-shape generate request; not a general serializer.
//! Invariants: Encoded output decodes back to the same three fields under `json::parse`.

use crate::core::error::{Error, ErrorKind};
use crate::json::encode::escape;

/// Transient request parameters, sanitized at construction: topic trimmed and
/// non-empty, count clamped to at least 1, difficulty lower-cased (empty
/// difficulty falls back to `"medium"`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuizRequest {
    topic: String,
    question_count: i64,
    difficulty: String,
}

impl QuizRequest {
    pub fn new(topic: &str, question_count: i64, difficulty: &str) -> Result<Self, Error> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::new(ErrorKind::Usage).with_message("Topic must not be empty"));
        }
        let difficulty = difficulty.trim();
        let difficulty = if difficulty.is_empty() {
            "medium".to_string()
        } else {
            difficulty.to_lowercase()
        };
        Ok(Self {
            topic: topic.to_string(),
            question_count: question_count.max(1),
            difficulty,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn question_count(&self) -> i64 {
        self.question_count
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Serialize to the fixed-shape body the backend expects.
    pub fn to_json(&self) -> String {
        format!(
            "{{\"topic\":\"{}\",\"questionCount\":{},\"difficulty\":\"{}\"}}",
            escape(&self.topic),
            self.question_count,
            escape(&self.difficulty)
        )
    }
}
