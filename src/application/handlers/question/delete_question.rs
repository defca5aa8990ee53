//! DeleteQuestionHandler - Command handler for deleting a question.

use std::sync::Arc;

use crate::domain::foundation::QuestionId;
use crate::domain::poll::PollError;
use crate::ports::PollStore;

/// Command to delete a question and, with it, all of its choices.
#[derive(Debug, Clone)]
pub struct DeleteQuestionCommand {
    pub id: QuestionId,
}

/// Handler for deleting questions.
///
/// Delegates directly to the store; cascade deletion of choices is the
/// store's contract.
pub struct DeleteQuestionHandler {
    store: Arc<dyn PollStore>,
}

impl DeleteQuestionHandler {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeleteQuestionCommand) -> Result<(), PollError> {
        self.store.delete_question(cmd.id).await?;
        Ok(())
    }
}
