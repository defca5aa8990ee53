//! Question command and query handlers.

mod create_question;
mod delete_question;
mod get_question;
mod list_questions;
mod update_question;

pub use create_question::{CreateQuestionCommand, CreateQuestionHandler};
pub use delete_question::{DeleteQuestionCommand, DeleteQuestionHandler};
pub use get_question::{GetQuestionHandler, GetQuestionQuery};
pub use list_questions::ListQuestionsHandler;
pub use update_question::{UpdateQuestionCommand, UpdateQuestionHandler};

use crate::domain::poll::{Choice, Question};

/// A question together with its current choices, the unit returned by every
/// question operation that carries a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}
