//! HTTP DTOs for question endpoints.
//!
//! These types decouple the wire format from domain types. Field names
//! (`question`, `choice_text`) are the public API contract.

use serde::{Deserialize, Serialize};

use crate::application::handlers::question::QuestionWithChoices;
use crate::domain::foundation::ChoiceId;
use crate::domain::poll::{Choice, ChoiceSpec};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A single choice entry in a create or update request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub choice_text: Option<String>,
}

impl From<ChoiceEntry> for ChoiceSpec {
    fn from(entry: ChoiceEntry) -> Self {
        ChoiceSpec {
            id: entry.id.map(ChoiceId::from_i64),
            text: entry.choice_text,
        }
    }
}

/// Request to create a question with its initial choices.
///
/// `question` is optional at the serde level so its absence surfaces as a
/// domain validation error (400) instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChoiceEntry>,
}

/// Request to update a question.
///
/// Omitting `choices` leaves stored choices untouched; providing it, even
/// as an empty list, replaces the stored set via reconciliation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<ChoiceEntry>>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A choice in an API response.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceResponse {
    pub id: i64,
    pub choice_text: String,
}

impl From<Choice> for ChoiceResponse {
    fn from(choice: Choice) -> Self {
        Self {
            id: choice.id().as_i64(),
            choice_text: choice.text().to_string(),
        }
    }
}

/// A question with its choices in an API response.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub question: String,
    pub choices: Vec<ChoiceResponse>,
}

impl From<QuestionWithChoices> for QuestionResponse {
    fn from(view: QuestionWithChoices) -> Self {
        Self {
            id: view.question.id().as_i64(),
            question: view.question.text().to_string(),
            choices: view.choices.into_iter().map(Into::into).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{QuestionId, Timestamp};
    use crate::domain::poll::Question;

    #[test]
    fn create_request_deserializes_with_choices() {
        let json = r#"{
            "question": "Best database?",
            "choices": [{"choice_text": "PostgreSQL"}, {"choice_text": "MySQL"}]
        }"#;
        let req: CreateQuestionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.question.as_deref(), Some("Best database?"));
        assert_eq!(req.choices.len(), 2);
        assert!(req.choices[0].id.is_none());
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let req: CreateQuestionRequest = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(req.question.is_none());
        assert!(req.choices.is_empty());
    }

    #[test]
    fn update_request_distinguishes_omitted_from_empty_choices() {
        let omitted: UpdateQuestionRequest =
            serde_json::from_str(r#"{"question": "Updated?"}"#).unwrap();
        assert!(omitted.choices.is_none());

        let empty: UpdateQuestionRequest =
            serde_json::from_str(r#"{"question": "Updated?", "choices": []}"#).unwrap();
        let entries = empty.choices.expect("choices key was provided");
        assert!(entries.is_empty());
    }

    #[test]
    fn update_request_entry_with_id_maps_to_spec() {
        let json = r#"{"choices": [{"id": 3, "choice_text": "Flask"}, {"choice_text": "Svelte"}]}"#;
        let req: UpdateQuestionRequest = serde_json::from_str(json).unwrap();
        let entries = req.choices.unwrap();

        let spec: ChoiceSpec = entries[0].clone().into();
        assert_eq!(spec.id, Some(ChoiceId::from_i64(3)));
        assert_eq!(spec.text.as_deref(), Some("Flask"));

        let spec: ChoiceSpec = entries[1].clone().into();
        assert!(spec.id.is_none());
    }

    #[test]
    fn question_response_serializes_expected_shape() {
        let question = Question::reconstitute(
            QuestionId::from_i64(1),
            "Question 1?".to_string(),
            Timestamp::now(),
        );
        let choices = vec![Choice::reconstitute(
            ChoiceId::from_i64(2),
            QuestionId::from_i64(1),
            "Option 1".to_string(),
            5,
        )];

        let response = QuestionResponse::from(QuestionWithChoices { question, choices });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "question": "Question 1?",
                "choices": [{"id": 2, "choice_text": "Option 1"}]
            })
        );
    }

    #[test]
    fn error_response_constructors_set_codes() {
        assert_eq!(ErrorResponse::bad_request("x").code, "BAD_REQUEST");
        assert_eq!(ErrorResponse::not_found("x").code, "NOT_FOUND");
        assert_eq!(ErrorResponse::internal("x").code, "INTERNAL_ERROR");
    }
}
