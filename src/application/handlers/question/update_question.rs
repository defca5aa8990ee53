//! UpdateQuestionHandler - Command handler reconciling a question update.
//!
//! Applies a submitted question text and choice list to a stored question.
//! Submitted entries are diffed against the stored choice set
//! (`reconcile_choices`) and the resulting change-set is applied by the
//! store as one logical transaction.

use std::sync::Arc;

use crate::domain::foundation::QuestionId;
use crate::domain::poll::{reconcile_choices, ChoiceSubmission, PollError, Question};
use crate::ports::PollStore;

use super::QuestionWithChoices;

/// Command to update a question.
///
/// A missing `text` keeps the stored text. `ChoiceSubmission::Omitted`
/// keeps the stored choices; `Replace` reconciles them against the
/// submitted list, even when that list is empty.
#[derive(Debug, Clone)]
pub struct UpdateQuestionCommand {
    pub id: QuestionId,
    pub text: Option<String>,
    pub choices: ChoiceSubmission,
}

/// Handler for updating questions and reconciling their choices.
pub struct UpdateQuestionHandler {
    store: Arc<dyn PollStore>,
}

impl UpdateQuestionHandler {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateQuestionCommand,
    ) -> Result<QuestionWithChoices, PollError> {
        let mut question = self
            .store
            .find_question(cmd.id)
            .await?
            .ok_or_else(|| PollError::question_not_found(cmd.id))?;

        if let Some(text) = &cmd.text {
            Question::validate_text(text)?;
            question = self.store.update_question_text(cmd.id, text).await?;
        }

        if let ChoiceSubmission::Replace(specs) = &cmd.choices {
            let existing = self.store.list_choices(cmd.id).await?;
            let changes = reconcile_choices(&existing, specs)?;
            if !changes.is_empty() {
                self.store.apply_choice_changes(cmd.id, &changes).await?;
            }
        }

        let choices = self.store.list_choices(cmd.id).await?;
        Ok(QuestionWithChoices { question, choices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryPollStore;
    use crate::domain::foundation::ChoiceId;
    use crate::domain::poll::{Choice, ChoiceSpec};

    struct Fixture {
        store: Arc<MemoryPollStore>,
        handler: UpdateQuestionHandler,
        question_id: QuestionId,
        choice_ids: Vec<ChoiceId>,
    }

    /// A question with choices Django, FastAPI, Flask.
    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryPollStore::new());
        let question = store
            .create_question("Favorite web framework?")
            .await
            .unwrap();
        let mut choice_ids = Vec::new();
        for text in ["Django", "FastAPI", "Flask"] {
            let choice = store.create_choice(question.id(), text).await.unwrap();
            choice_ids.push(choice.id());
        }
        Fixture {
            handler: UpdateQuestionHandler::new(store.clone()),
            store,
            question_id: question.id(),
            choice_ids,
        }
    }

    fn spec(id: Option<ChoiceId>, text: Option<&str>) -> ChoiceSpec {
        ChoiceSpec {
            id,
            text: text.map(str::to_string),
        }
    }

    fn texts(choices: &[Choice]) -> Vec<&str> {
        choices.iter().map(|c| c.text()).collect()
    }

    #[tokio::test]
    async fn resubmitting_every_choice_keeps_the_set_intact() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: Some("What is your preferred web framework?".to_string()),
            choices: ChoiceSubmission::Replace(vec![
                spec(Some(fx.choice_ids[0]), Some("Django")),
                spec(Some(fx.choice_ids[1]), Some("FastAPI")),
                spec(Some(fx.choice_ids[2]), Some("Flask")),
            ]),
        };

        let result = fx.handler.handle(cmd).await.unwrap();
        assert_eq!(
            result.question.text(),
            "What is your preferred web framework?"
        );
        assert_eq!(result.choices.len(), 3);
        assert_eq!(texts(&result.choices), vec!["Django", "FastAPI", "Flask"]);
    }

    #[tokio::test]
    async fn mixed_submission_updates_creates_and_deletes() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: Some("Updated favorite web framework?".to_string()),
            choices: ChoiceSubmission::Replace(vec![
                spec(Some(fx.choice_ids[0]), Some("Django Modified")),
                spec(None, Some("Svelte")),
                spec(None, Some("Angular")),
            ]),
        };

        let result = fx.handler.handle(cmd).await.unwrap();
        assert_eq!(result.choices.len(), 3);

        let texts = texts(&result.choices);
        assert!(texts.contains(&"Django Modified"));
        assert!(texts.contains(&"Svelte"));
        assert!(texts.contains(&"Angular"));
        assert!(!texts.contains(&"FastAPI"));
        assert!(!texts.contains(&"Flask"));

        // The updated choice kept its identity.
        assert!(result.choices.iter().any(|c| c.id() == fx.choice_ids[0]));
        assert_eq!(fx.store.choice_count(), 3);
    }

    #[tokio::test]
    async fn empty_replacement_deletes_every_choice() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: Some("Question without options?".to_string()),
            choices: ChoiceSubmission::Replace(vec![]),
        };

        let result = fx.handler.handle(cmd).await.unwrap();
        assert!(result.choices.is_empty());
        assert_eq!(fx.store.choice_count(), 0);
    }

    #[tokio::test]
    async fn omitted_choices_leave_stored_choices_untouched() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: Some("Updated question?".to_string()),
            choices: ChoiceSubmission::Omitted,
        };

        let result = fx.handler.handle(cmd).await.unwrap();
        assert_eq!(result.question.text(), "Updated question?");
        assert_eq!(result.choices.len(), 3);
        assert_eq!(texts(&result.choices), vec!["Django", "FastAPI", "Flask"]);
    }

    #[tokio::test]
    async fn omitted_text_keeps_stored_text() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: None,
            choices: ChoiceSubmission::Replace(vec![spec(
                Some(fx.choice_ids[0]),
                Some("Django Only"),
            )]),
        };

        let result = fx.handler.handle(cmd).await.unwrap();
        assert_eq!(result.question.text(), "Favorite web framework?");
        assert_eq!(result.choices.len(), 1);
        assert_eq!(result.choices[0].text(), "Django Only");
    }

    #[tokio::test]
    async fn unknown_choice_id_creates_instead_of_erroring() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: None,
            choices: ChoiceSubmission::Replace(vec![spec(
                Some(ChoiceId::from_i64(9999)),
                Some("X"),
            )]),
        };

        let result = fx.handler.handle(cmd).await.unwrap();
        assert_eq!(result.choices.len(), 1);
        assert_eq!(result.choices[0].text(), "X");
        assert_ne!(result.choices[0].id(), ChoiceId::from_i64(9999));
    }

    #[tokio::test]
    async fn unknown_question_id_fails_not_found() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: QuestionId::from_i64(9999),
            text: Some("Test".to_string()),
            choices: ChoiceSubmission::Replace(vec![]),
        };

        let result = fx.handler.handle(cmd).await;
        assert!(matches!(result, Err(PollError::NotFound(_))));
        // Nothing was touched.
        assert_eq!(fx.store.choice_count(), 3);
    }

    #[tokio::test]
    async fn invalid_entry_leaves_choice_set_unchanged() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: None,
            choices: ChoiceSubmission::Replace(vec![
                spec(None, Some("Valid")),
                spec(None, None),
            ]),
        };

        let result = fx.handler.handle(cmd).await;
        assert!(matches!(result, Err(PollError::Validation(_))));
        assert_eq!(fx.store.choice_count(), 3);
    }

    #[tokio::test]
    async fn sequential_updates_apply_last_write_wins() {
        let fx = fixture().await;

        for text in ["Updated 1", "Updated 2"] {
            let cmd = UpdateQuestionCommand {
                id: fx.question_id,
                text: Some(format!("Test concurrency {}?", text)),
                choices: ChoiceSubmission::Replace(vec![spec(
                    Some(fx.choice_ids[0]),
                    Some(text),
                )]),
            };
            fx.handler.handle(cmd).await.unwrap();
        }

        let choices = fx.store.list_choices(fx.question_id).await.unwrap();
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].text(), "Updated 2");
    }

    #[tokio::test]
    async fn repeated_fetch_after_update_is_stable() {
        let fx = fixture().await;
        let cmd = UpdateQuestionCommand {
            id: fx.question_id,
            text: None,
            choices: ChoiceSubmission::Omitted,
        };

        let first = fx.handler.handle(cmd.clone()).await.unwrap();
        let second = fx.handler.handle(cmd).await.unwrap();
        assert_eq!(first.choices, second.choices);
    }
}
