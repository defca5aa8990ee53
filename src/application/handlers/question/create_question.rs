//! CreateQuestionHandler - Command handler for creating questions with choices.

use std::sync::Arc;

use crate::domain::poll::{reconcile_choices, ChoiceSpec, PollError, Question};
use crate::ports::PollStore;

use super::QuestionWithChoices;

/// Command to create a question together with its initial choices.
///
/// Identifiers on submitted entries are ignored; every entry becomes a
/// fresh choice, created in submission order.
#[derive(Debug, Clone)]
pub struct CreateQuestionCommand {
    pub text: Option<String>,
    pub choices: Vec<ChoiceSpec>,
}

/// Handler for creating questions.
pub struct CreateQuestionHandler {
    store: Arc<dyn PollStore>,
}

impl CreateQuestionHandler {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: CreateQuestionCommand,
    ) -> Result<QuestionWithChoices, PollError> {
        let text = cmd.text.as_deref().unwrap_or_default();
        Question::validate_text(text)?;

        // Against an empty stored set every entry is a create, which is
        // exactly the creation contract: submitted ids are ignored and
        // submission order is preserved.
        let changes = reconcile_choices(&[], &cmd.choices)?;

        let question = self.store.create_question(text).await?;
        let mut choices = Vec::with_capacity(changes.creates.len());
        for choice_text in &changes.creates {
            choices.push(self.store.create_choice(question.id(), choice_text).await?);
        }

        Ok(QuestionWithChoices { question, choices })
    }
}
