//! HTTP routes for question endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_question, delete_question, get_question, list_questions, update_question,
    QuestionHandlers,
};

/// Creates the question router with all endpoints.
pub fn question_routes(handlers: QuestionHandlers) -> Router {
    Router::new()
        .route("/", get(list_questions).post(create_question))
        .route(
            "/:id",
            get(get_question)
                .put(update_question)
                .patch(update_question)
                .delete(delete_question),
        )
        .with_state(handlers)
}
