//! PostgreSQL implementation of PollStore.
//!
//! Cascade deletion and change-set application run inside explicit
//! transactions; the schema deliberately has no `ON DELETE CASCADE`, so the
//! two-step delete here is the only cascade path.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{ChoiceId, DomainError, ErrorCode, QuestionId, Timestamp};
use crate::domain::poll::{Choice, ChoiceChangeSet, Question};
use crate::ports::PollStore;

/// PostgreSQL implementation of PollStore.
#[derive(Clone)]
pub struct PostgresPollStore {
    pool: PgPool,
}

impl PostgresPollStore {
    /// Creates a new PostgresPollStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PostgresPollStore {
    async fn create_question(&self, text: &str) -> Result<Question, DomainError> {
        Question::validate_text(text)?;

        let published_at = Timestamp::now();
        let row = sqlx::query(
            "INSERT INTO questions (question_text, published_at) VALUES ($1, $2) RETURNING id",
        )
        .bind(text)
        .bind(published_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert question: {}", e),
            )
        })?;

        let id: i64 = row.try_get("id").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
        })?;

        Ok(Question::reconstitute(
            QuestionId::from_i64(id),
            text.to_string(),
            published_at,
        ))
    }

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError> {
        let row = sqlx::query(
            "SELECT id, question_text, published_at FROM questions WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch question: {}", e),
            )
        })?;

        row.map(row_to_question).transpose()
    }

    async fn list_questions(&self) -> Result<Vec<Question>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, question_text, published_at FROM questions
             ORDER BY published_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list questions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_question).collect()
    }

    async fn update_question_text(
        &self,
        id: QuestionId,
        text: &str,
    ) -> Result<Question, DomainError> {
        Question::validate_text(text)?;

        let row = sqlx::query(
            "UPDATE questions SET question_text = $2 WHERE id = $1
             RETURNING id, question_text, published_at",
        )
        .bind(id.as_i64())
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update question: {}", e),
            )
        })?;

        match row {
            Some(row) => row_to_question(row),
            None => Err(question_not_found(id)),
        }
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        // Children first; the FK has no cascade on purpose.
        sqlx::query("DELETE FROM choices WHERE question_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete choices: {}", e),
                )
            })?;

        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete question: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the choice deletion.
            return Err(question_not_found(id));
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })
    }

    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, question_id, choice_text, votes FROM choices
             WHERE question_id = $1
             ORDER BY votes DESC, id ASC",
        )
        .bind(question_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list choices: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_choice).collect()
    }

    async fn create_choice(
        &self,
        question_id: QuestionId,
        text: &str,
    ) -> Result<Choice, DomainError> {
        Choice::validate_text(text)?;

        let row = sqlx::query(
            "INSERT INTO choices (question_id, choice_text, votes) VALUES ($1, $2, 0)
             RETURNING id",
        )
        .bind(question_id.as_i64())
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_foreign_key_violation() => question_not_found(question_id),
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert choice: {}", e),
            ),
        })?;

        let id: i64 = row.try_get("id").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
        })?;

        Ok(Choice::reconstitute(
            ChoiceId::from_i64(id),
            question_id,
            text.to_string(),
            0,
        ))
    }

    async fn update_choice_text(&self, id: ChoiceId, text: &str) -> Result<Choice, DomainError> {
        Choice::validate_text(text)?;

        let row = sqlx::query(
            "UPDATE choices SET choice_text = $2 WHERE id = $1
             RETURNING id, question_id, choice_text, votes",
        )
        .bind(id.as_i64())
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update choice: {}", e),
            )
        })?;

        match row {
            Some(row) => row_to_choice(row),
            None => Err(choice_not_found(id)),
        }
    }

    async fn delete_choice(&self, id: ChoiceId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM choices WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete choice: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(choice_not_found(id));
        }

        Ok(())
    }

    async fn apply_choice_changes(
        &self,
        question_id: QuestionId,
        changes: &ChoiceChangeSet,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        for (id, text) in &changes.updates {
            Choice::validate_text(text)?;
            sqlx::query("UPDATE choices SET choice_text = $3 WHERE id = $1 AND question_id = $2")
                .bind(id.as_i64())
                .bind(question_id.as_i64())
                .bind(text)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to update choice: {}", e),
                    )
                })?;
        }

        for text in &changes.creates {
            Choice::validate_text(text)?;
            sqlx::query("INSERT INTO choices (question_id, choice_text, votes) VALUES ($1, $2, 0)")
                .bind(question_id.as_i64())
                .bind(text)
                .execute(&mut *tx)
                .await
                .map_err(|e| match e.as_database_error() {
                    Some(db_err) if db_err.is_foreign_key_violation() => {
                        question_not_found(question_id)
                    }
                    _ => DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to insert choice: {}", e),
                    ),
                })?;
        }

        for id in &changes.deletes {
            sqlx::query("DELETE FROM choices WHERE id = $1 AND question_id = $2")
                .bind(id.as_i64())
                .bind(question_id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to delete choice: {}", e),
                    )
                })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

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

fn row_to_question(row: sqlx::postgres::PgRow) -> Result<Question, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let text: String = row.try_get("question_text").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get question_text: {}", e),
        )
    })?;

    let published_at: chrono::DateTime<chrono::Utc> =
        row.try_get("published_at").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get published_at: {}", e),
            )
        })?;

    Ok(Question::reconstitute(
        QuestionId::from_i64(id),
        text,
        Timestamp::from_datetime(published_at),
    ))
}

fn row_to_choice(row: sqlx::postgres::PgRow) -> Result<Choice, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let question_id: i64 = row.try_get("question_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get question_id: {}", e),
        )
    })?;

    let text: String = row.try_get("choice_text").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get choice_text: {}", e),
        )
    })?;

    let votes: i32 = row.try_get("votes").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get votes: {}", e),
        )
    })?;

    Ok(Choice::reconstitute(
        ChoiceId::from_i64(id),
        QuestionId::from_i64(question_id),
        text,
        votes.max(0) as u32,
    ))
}
