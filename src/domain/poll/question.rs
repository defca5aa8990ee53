//! Question entity.

use crate::domain::foundation::{DomainError, QuestionId, Timestamp};
use serde::{Deserialize, Serialize};

/// Maximum length for question text.
pub const MAX_QUESTION_TEXT_LENGTH: usize = 200;

/// A pollable prompt owning a collection of choices.
///
/// # Invariants
///
/// - `id` is store-assigned and unique
/// - `text` is 1-200 characters, non-empty after trimming
/// - `published_at` is set once at creation and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    id: QuestionId,

    /// The question body shown to voters.
    text: String,

    /// When the question was published (the creation instant).
    published_at: Timestamp,
}

impl Question {
    /// Reconstitute a question from stored state.
    ///
    /// Identifier assignment and the publication instant belong to the
    /// entity store, so this is the only constructor.
    pub fn reconstitute(id: QuestionId, text: String, published_at: Timestamp) -> Self {
        Self {
            id,
            text,
            published_at,
        }
    }

    /// Returns the question ID.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Returns the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the question was published.
    pub fn published_at(&self) -> &Timestamp {
        &self.published_at
    }

    /// Replace the question text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new text is empty or too long
    pub fn set_text(&mut self, text: String) -> Result<(), DomainError> {
        Self::validate_text(&text)?;
        self.text = text;
        Ok(())
    }

    /// Validates question text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is empty or longer than 200 characters
    pub fn validate_text(text: &str) -> Result<(), DomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Question text cannot be empty"));
        }
        if trimmed.len() > MAX_QUESTION_TEXT_LENGTH {
            return Err(DomainError::validation(format!(
                "Question text must be {} characters or less",
                MAX_QUESTION_TEXT_LENGTH
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_question() -> Question {
        Question::reconstitute(
            QuestionId::from_i64(1),
            "What is your favorite framework?".to_string(),
            Timestamp::now(),
        )
    }

    #[test]
    fn reconstitute_preserves_fields() {
        let question = test_question();
        assert_eq!(question.id(), QuestionId::from_i64(1));
        assert_eq!(question.text(), "What is your favorite framework?");
    }

    #[test]
    fn validate_text_rejects_empty() {
        assert!(Question::validate_text("").is_err());
    }

    #[test]
    fn validate_text_rejects_whitespace() {
        assert!(Question::validate_text("   ").is_err());
    }

    #[test]
    fn validate_text_rejects_too_long() {
        let long = "x".repeat(MAX_QUESTION_TEXT_LENGTH + 1);
        assert!(Question::validate_text(&long).is_err());
    }

    #[test]
    fn validate_text_accepts_max_length() {
        let text = "x".repeat(MAX_QUESTION_TEXT_LENGTH);
        assert!(Question::validate_text(&text).is_ok());
    }

    #[test]
    fn set_text_replaces_text() {
        let mut question = test_question();
        question.set_text("Updated question?".to_string()).unwrap();
        assert_eq!(question.text(), "Updated question?");
    }

    #[test]
    fn set_text_rejects_empty() {
        let mut question = test_question();
        assert!(question.set_text("".to_string()).is_err());
        assert_eq!(question.text(), "What is your favorite framework?");
    }
}
