use chrono::Utc;
use sqlx::error::ErrorKind;

use assigndrop_core::domain::assignment::{Assignment, NewAssignment, SubmissionId};

use super::{AssignmentRepository, RepositoryError};
use crate::DbPool;

pub struct SqlAssignmentRepository {
    pool: DbPool,
}

impl SqlAssignmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AssignmentRepository for SqlAssignmentRepository {
    async fn insert(&self, assignment: NewAssignment) -> Result<Assignment, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO assignments (submission_id, owner_identity, created_at)
             VALUES (?, ?, ?)",
        )
        .bind(assignment.submission_id.as_str())
        .bind(&assignment.owner_identity)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Assignment {
                submission_id: assignment.submission_id,
                owner_identity: assignment.owner_identity,
                created_at,
            }),
            Err(sqlx::Error::Database(db_error))
                if matches!(db_error.kind(), ErrorKind::UniqueViolation) =>
            {
                Err(RepositoryError::Conflict { submission_id: assignment.submission_id })
            }
            Err(error) => Err(RepositoryError::Database(error)),
        }
    }

    async fn exists(&self, submission_id: &SubmissionId) -> Result<bool, RepositoryError> {
        let found: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assignments WHERE submission_id = ?)",
        )
        .bind(submission_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(found == 1)
    }
}
