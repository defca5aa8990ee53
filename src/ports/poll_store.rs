//! Entity store port for questions and choices.
//!
//! The store is the sole authority for identifier assignment and cascade
//! deletion. Implementations back it with PostgreSQL (production) or an
//! in-memory map (tests, local runs).
//!
//! # Design
//!
//! - Identifiers are assigned on insert and never reused
//! - Deleting a question removes its choices in the same logical transaction
//! - `apply_choice_changes` gives reconciliation a single atomic write

use async_trait::async_trait;

use crate::domain::foundation::{ChoiceId, DomainError, QuestionId};
use crate::domain::poll::{Choice, ChoiceChangeSet, Question};

/// Repository port for question and choice persistence.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Create a question, assigning an id and the publication instant.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is empty or too long
    /// - `DatabaseError` on persistence failure
    async fn create_question(&self, text: &str) -> Result<Question, DomainError>;

    /// Find a question by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError>;

    /// All questions, newest first.
    async fn list_questions(&self) -> Result<Vec<Question>, DomainError>;

    /// Replace a question's text.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the id is absent
    /// - `ValidationFailed` if the text is empty or too long
    async fn update_question_text(
        &self,
        id: QuestionId,
        text: &str,
    ) -> Result<Question, DomainError>;

    /// Delete a question and, atomically, every choice it owns.
    ///
    /// A second delete of the same id reports `QuestionNotFound`; deletion
    /// is not idempotent at the API level.
    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError>;

    /// Choices owned by a question, in display order (votes descending,
    /// then id ascending).
    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, DomainError>;

    /// Create a choice with zero votes.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the owning question is absent
    /// - `ValidationFailed` if the text is empty or too long
    async fn create_choice(
        &self,
        question_id: QuestionId,
        text: &str,
    ) -> Result<Choice, DomainError>;

    /// Replace a choice's text.
    ///
    /// # Errors
    ///
    /// - `ChoiceNotFound` if the id is absent
    async fn update_choice_text(&self, id: ChoiceId, text: &str) -> Result<Choice, DomainError>;

    /// Delete a single choice.
    ///
    /// # Errors
    ///
    /// - `ChoiceNotFound` if the id is absent
    async fn delete_choice(&self, id: ChoiceId) -> Result<(), DomainError>;

    /// Apply a reconciliation change-set as one logical transaction.
    ///
    /// Updates and creates run in change-set order, deletes last. If a step
    /// fails, no partial mutation of the choice set may remain observable.
    async fn apply_choice_changes(
        &self,
        question_id: QuestionId,
        changes: &ChoiceChangeSet,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn poll_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn PollStore) {}
    }
}
