//! HTTP handlers for question endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::question::{
    CreateQuestionCommand, CreateQuestionHandler, DeleteQuestionCommand, DeleteQuestionHandler,
    GetQuestionHandler, GetQuestionQuery, ListQuestionsHandler, UpdateQuestionCommand,
    UpdateQuestionHandler,
};
use crate::domain::foundation::QuestionId;
use crate::domain::poll::{ChoiceSubmission, PollError};

use super::dto::{CreateQuestionRequest, ErrorResponse, QuestionResponse, UpdateQuestionRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QuestionHandlers {
    create_handler: Arc<CreateQuestionHandler>,
    get_handler: Arc<GetQuestionHandler>,
    list_handler: Arc<ListQuestionsHandler>,
    update_handler: Arc<UpdateQuestionHandler>,
    delete_handler: Arc<DeleteQuestionHandler>,
}

impl QuestionHandlers {
    pub fn new(
        create_handler: Arc<CreateQuestionHandler>,
        get_handler: Arc<GetQuestionHandler>,
        list_handler: Arc<ListQuestionsHandler>,
        update_handler: Arc<UpdateQuestionHandler>,
        delete_handler: Arc<DeleteQuestionHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            list_handler,
            update_handler,
            delete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/questions - Create a question with choices
pub async fn create_question(
    State(handlers): State<QuestionHandlers>,
    Json(req): Json<CreateQuestionRequest>,
) -> Response {
    let cmd = CreateQuestionCommand {
        text: req.question,
        choices: req.choices.into_iter().map(Into::into).collect(),
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(view) => (StatusCode::CREATED, Json(QuestionResponse::from(view))).into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/questions - List all questions
pub async fn list_questions(State(handlers): State<QuestionHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(list) => {
            let body: Vec<QuestionResponse> = list.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_poll_error(e),
    }
}

/// GET /api/questions/:id - Retrieve a question with its choices
pub async fn get_question(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
) -> Response {
    let query = GetQuestionQuery {
        id: QuestionId::from_i64(id),
    };

    match handlers.get_handler.handle(query).await {
        Ok(view) => (StatusCode::OK, Json(QuestionResponse::from(view))).into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// PUT/PATCH /api/questions/:id - Update a question, reconciling choices
pub async fn update_question(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateQuestionRequest>,
) -> Response {
    let choices = match req.choices {
        Some(entries) => ChoiceSubmission::Replace(entries.into_iter().map(Into::into).collect()),
        None => ChoiceSubmission::Omitted,
    };
    let cmd = UpdateQuestionCommand {
        id: QuestionId::from_i64(id),
        text: req.question,
        choices,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(view) => (StatusCode::OK, Json(QuestionResponse::from(view))).into_response(),
        Err(e) => handle_poll_error(e),
    }
}

/// DELETE /api/questions/:id - Delete a question and its choices
pub async fn delete_question(
    State(handlers): State<QuestionHandlers>,
    Path(id): Path<i64>,
) -> Response {
    let cmd = DeleteQuestionCommand {
        id: QuestionId::from_i64(id),
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_poll_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_poll_error(error: PollError) -> Response {
    match error {
        PollError::NotFound(message) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(message)),
        )
            .into_response(),
        PollError::Validation(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        PollError::Storage(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let error = PollError::question_not_found(QuestionId::from_i64(9999));
        let response = handle_poll_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let error = PollError::validation("Question text cannot be empty");
        let response = handle_poll_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_maps_to_500() {
        let error = PollError::storage("connection lost");
        let response = handle_poll_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
