//! In-memory implementation of PollStore.
//!
//! Backs tests and local runs with plain maps behind a lock. One write
//! lock spans every multi-step mutation, which is what makes cascade
//! deletes and change-set application atomic here.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This is acceptable
//! for test code but this adapter should NOT be used in production.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{ChoiceId, DomainError, ErrorCode, QuestionId, Timestamp};
use crate::domain::poll::{Choice, ChoiceChangeSet, Question};
use crate::ports::PollStore;

#[derive(Default)]
struct State {
    questions: BTreeMap<i64, Question>,
    choices: BTreeMap<i64, Choice>,
    next_question_id: i64,
    next_choice_id: i64,
}

impl State {
    fn question_not_found(id: QuestionId) -> DomainError {
        DomainError::new(
            ErrorCode::QuestionNotFound,
            format!("Question not found: {}", id),
        )
    }

    fn choice_not_found(id: ChoiceId) -> DomainError {
        DomainError::new(
            ErrorCode::ChoiceNotFound,
            format!("Choice not found: {}", id),
        )
    }

    fn insert_choice(&mut self, question_id: QuestionId, text: &str) -> Choice {
        self.next_choice_id += 1;
        let choice = Choice::reconstitute(
            ChoiceId::from_i64(self.next_choice_id),
            question_id,
            text.to_string(),
            0,
        );
        self.choices.insert(self.next_choice_id, choice.clone());
        choice
    }

    fn sorted_choices(&self, question_id: QuestionId) -> Vec<Choice> {
        let mut choices: Vec<Choice> = self
            .choices
            .values()
            .filter(|c| c.question_id() == question_id)
            .cloned()
            .collect();
        choices.sort_by(|a, b| b.votes().cmp(&a.votes()).then(a.id().cmp(&b.id())));
        choices
    }
}

/// In-memory poll store for tests and local runs.
pub struct MemoryPollStore {
    state: RwLock<State>,
}

impl MemoryPollStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    // === Test Helpers ===

    /// Total number of stored questions.
    pub fn question_count(&self) -> usize {
        self.state
            .read()
            .expect("MemoryPollStore: lock poisoned")
            .questions
            .len()
    }

    /// Total number of stored choices across all questions.
    pub fn choice_count(&self) -> usize {
        self.state
            .read()
            .expect("MemoryPollStore: lock poisoned")
            .choices
            .len()
    }

    /// Overwrite a choice's vote tally. Vote casting itself is outside this
    /// crate; this exists so display ordering is testable.
    ///
    /// Returns false if the choice does not exist.
    pub fn set_votes(&self, id: ChoiceId, votes: u32) -> bool {
        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");
        match state.choices.get(&id.as_i64()).cloned() {
            Some(choice) => {
                state.choices.insert(
                    id.as_i64(),
                    Choice::reconstitute(
                        choice.id(),
                        choice.question_id(),
                        choice.text().to_string(),
                        votes,
                    ),
                );
                true
            }
            None => false,
        }
    }
}

impl Default for MemoryPollStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PollStore for MemoryPollStore {
    async fn create_question(&self, text: &str) -> Result<Question, DomainError> {
        Question::validate_text(text)?;

        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");
        state.next_question_id += 1;
        let question = Question::reconstitute(
            QuestionId::from_i64(state.next_question_id),
            text.to_string(),
            Timestamp::now(),
        );
        let new_id = state.next_question_id;
        state.questions.insert(new_id, question.clone());
        Ok(question)
    }

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError> {
        let state = self.state.read().expect("MemoryPollStore: lock poisoned");
        Ok(state.questions.get(&id.as_i64()).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, DomainError> {
        let state = self.state.read().expect("MemoryPollStore: lock poisoned");
        let mut questions: Vec<Question> = state.questions.values().cloned().collect();
        questions.sort_by(|a, b| {
            b.published_at()
                .cmp(a.published_at())
                .then(b.id().cmp(&a.id()))
        });
        Ok(questions)
    }

    async fn update_question_text(
        &self,
        id: QuestionId,
        text: &str,
    ) -> Result<Question, DomainError> {
        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");
        let question = state
            .questions
            .get_mut(&id.as_i64())
            .ok_or_else(|| State::question_not_found(id))?;
        question.set_text(text.to_string())?;
        Ok(question.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError> {
        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");
        if state.questions.remove(&id.as_i64()).is_none() {
            return Err(State::question_not_found(id));
        }
        state.choices.retain(|_, c| c.question_id() != id);
        Ok(())
    }

    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, DomainError> {
        let state = self.state.read().expect("MemoryPollStore: lock poisoned");
        Ok(state.sorted_choices(question_id))
    }

    async fn create_choice(
        &self,
        question_id: QuestionId,
        text: &str,
    ) -> Result<Choice, DomainError> {
        Choice::validate_text(text)?;

        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");
        if !state.questions.contains_key(&question_id.as_i64()) {
            return Err(State::question_not_found(question_id));
        }
        Ok(state.insert_choice(question_id, text))
    }

    async fn update_choice_text(&self, id: ChoiceId, text: &str) -> Result<Choice, DomainError> {
        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");
        let choice = state
            .choices
            .get_mut(&id.as_i64())
            .ok_or_else(|| State::choice_not_found(id))?;
        choice.set_text(text.to_string())?;
        Ok(choice.clone())
    }

    async fn delete_choice(&self, id: ChoiceId) -> Result<(), DomainError> {
        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");
        if state.choices.remove(&id.as_i64()).is_none() {
            return Err(State::choice_not_found(id));
        }
        Ok(())
    }

    async fn apply_choice_changes(
        &self,
        question_id: QuestionId,
        changes: &ChoiceChangeSet,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().expect("MemoryPollStore: lock poisoned");

        // Validate everything up front so the map is never left partially
        // mutated: the lock makes the application atomic only if no step
        // past this point can fail.
        if !state.questions.contains_key(&question_id.as_i64()) {
            return Err(State::question_not_found(question_id));
        }
        for (id, text) in &changes.updates {
            Choice::validate_text(text)?;
            match state.choices.get(&id.as_i64()) {
                Some(c) if c.question_id() == question_id => {}
                _ => return Err(State::choice_not_found(*id)),
            }
        }
        for text in &changes.creates {
            Choice::validate_text(text)?;
        }
        for id in &changes.deletes {
            match state.choices.get(&id.as_i64()) {
                Some(c) if c.question_id() == question_id => {}
                _ => return Err(State::choice_not_found(*id)),
            }
        }

        for (id, text) in &changes.updates {
            let choice = state
                .choices
                .get_mut(&id.as_i64())
                .expect("validated above");
            choice.set_text(text.clone())?;
        }
        for text in &changes.creates {
            state.insert_choice(question_id, text);
        }
        for id in &changes.deletes {
            state.choices.remove(&id.as_i64());
        }

        Ok(())
    }
}
