//! Poll-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};

/// Poll-level errors surfaced by the application handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Referenced entity does not exist.
    NotFound(String),
    /// Input failed validation.
    Validation(String),
    /// Storage failure.
    Storage(String),
}

impl PollError {
    pub fn question_not_found(id: QuestionId) -> Self {
        PollError::NotFound(format!("Question not found: {}", id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PollError::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        PollError::Storage(message.into())
    }
}

impl std::fmt::Display for PollError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollError::NotFound(msg) => write!(f, "{}", msg),
            PollError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            PollError::Storage(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PollError {}

impl From<DomainError> for PollError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::QuestionNotFound | ErrorCode::ChoiceNotFound => {
                PollError::NotFound(err.message)
            }
            ErrorCode::ValidationFailed => PollError::Validation(err.message),
            ErrorCode::DatabaseError | ErrorCode::InternalError => PollError::Storage(err.message),
        }
    }
}
