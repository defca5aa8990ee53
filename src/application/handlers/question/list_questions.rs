//! ListQuestionsHandler - Query handler for listing all questions.

use std::sync::Arc;

use crate::domain::poll::PollError;
use crate::ports::PollStore;

use super::QuestionWithChoices;

/// Handler for listing every question with its choices, newest first.
pub struct ListQuestionsHandler {
    store: Arc<dyn PollStore>,
}

impl ListQuestionsHandler {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Vec<QuestionWithChoices>, PollError> {
        let questions = self.store.list_questions().await?;
        let mut out = Vec::with_capacity(questions.len());
        for question in questions {
            let choices = self.store.list_choices(question.id()).await?;
            out.push(QuestionWithChoices { question, choices });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryPollStore;

    #[tokio::test]
    async fn lists_all_questions_with_their_choices() {
        let store = Arc::new(MemoryPollStore::new());
        let q1 = store.create_question("Question 1?").await.unwrap();
        store.create_choice(q1.id(), "Option 1").await.unwrap();
        store.create_choice(q1.id(), "Option 2").await.unwrap();
        store.create_question("Question 2?").await.unwrap();

        let handler = ListQuestionsHandler::new(store);
        let list = handler.handle().await.unwrap();

        assert_eq!(list.len(), 2);
        let q1_entry = list
            .iter()
            .find(|item| item.question.id() == q1.id())
            .unwrap();
        assert_eq!(q1_entry.choices.len(), 2);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = Arc::new(MemoryPollStore::new());
        let handler = ListQuestionsHandler::new(store);
        assert!(handler.handle().await.unwrap().is_empty());
    }
}
