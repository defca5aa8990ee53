//! GetQuestionHandler - Query handler for fetching a question with choices.

use std::sync::Arc;

use crate::domain::foundation::QuestionId;
use crate::domain::poll::PollError;
use crate::ports::PollStore;

use super::QuestionWithChoices;

/// Query to get a question by ID.
#[derive(Debug, Clone)]
pub struct GetQuestionQuery {
    pub id: QuestionId,
}

/// Handler for retrieving a question with its choices.
pub struct GetQuestionHandler {
    store: Arc<dyn PollStore>,
}

impl GetQuestionHandler {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetQuestionQuery) -> Result<QuestionWithChoices, PollError> {
        let question = self
            .store
            .find_question(query.id)
            .await?
            .ok_or_else(|| PollError::question_not_found(query.id))?;
        let choices = self.store.list_choices(query.id).await?;
        Ok(QuestionWithChoices { question, choices })
    }
}
