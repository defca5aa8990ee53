//! Choice entity.

use crate::domain::foundation::{ChoiceId, DomainError, QuestionId};
use serde::{Deserialize, Serialize};

/// Maximum length for choice text.
pub const MAX_CHOICE_TEXT_LENGTH: usize = 200;

/// An option belonging to exactly one question, carrying a vote tally.
///
/// # Invariants
///
/// - `id` is store-assigned and unique
/// - `question_id` refers to an existing question for the choice's lifetime
/// - `votes` starts at zero; vote casting is outside this crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Unique identifier for this choice.
    id: ChoiceId,

    /// The owning question.
    question_id: QuestionId,

    /// The choice body shown to voters.
    text: String,

    /// Vote tally.
    votes: u32,
}

impl Choice {
    /// Reconstitute a choice from stored state.
    pub fn reconstitute(id: ChoiceId, question_id: QuestionId, text: String, votes: u32) -> Self {
        Self {
            id,
            question_id,
            text,
            votes,
        }
    }

    /// Returns the choice ID.
    pub fn id(&self) -> ChoiceId {
        self.id
    }

    /// Returns the owning question's ID.
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Returns the choice text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the vote tally.
    pub fn votes(&self) -> u32 {
        self.votes
    }

    /// Replace the choice text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the new text is empty or too long
    pub fn set_text(&mut self, text: String) -> Result<(), DomainError> {
        Self::validate_text(&text)?;
        self.text = text;
        Ok(())
    }

    /// Validates choice text.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is empty or longer than 200 characters
    pub fn validate_text(text: &str) -> Result<(), DomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Choice text cannot be empty"));
        }
        if trimmed.len() > MAX_CHOICE_TEXT_LENGTH {
            return Err(DomainError::validation(format!(
                "Choice text must be {} characters or less",
                MAX_CHOICE_TEXT_LENGTH
            )));
        }
        Ok(())
    }
}
