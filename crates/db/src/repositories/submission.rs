use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use assigndrop_core::domain::assignment::SubmissionId;
use assigndrop_core::domain::submission::{NewSubmission, Submission};

use super::{RepositoryError, SubmissionRepository};
use crate::DbPool;

pub struct SqlSubmissionRepository {
    pool: DbPool,
}

impl SqlSubmissionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SubmissionRepository for SqlSubmissionRepository {
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, RepositoryError> {
        let submitted_at = Utc::now();

        sqlx::query(
            "INSERT INTO submissions
                (assignment_submission_id, submitter_identity, content_link, submitted_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(submission.assignment_submission_id.as_str())
        .bind(&submission.submitter_identity)
        .bind(&submission.content_link)
        .bind(submitted_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Submission {
            assignment_submission_id: submission.assignment_submission_id,
            submitter_identity: submission.submitter_identity,
            content_link: submission.content_link,
            submitted_at,
        })
    }

    async fn list_for_assignment(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Submission>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT
                assignment_submission_id,
                submitter_identity,
                content_link,
                submitted_at
             FROM submissions
             WHERE assignment_submission_id = ?
             ORDER BY submitted_at DESC, id DESC",
        )
        .bind(submission_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(submission_from_row).collect()
    }
}

fn submission_from_row(row: SqliteRow) -> Result<Submission, RepositoryError> {
    Ok(Submission {
        assignment_submission_id: SubmissionId(row.try_get("assignment_submission_id")?),
        submitter_identity: row.try_get("submitter_identity")?,
        content_link: row.try_get("content_link")?,
        submitted_at: parse_timestamp("submitted_at", row.try_get("submitted_at")?)?,
    })
}

fn parse_timestamp(column: &str, value: String) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(&value).map(|timestamp| timestamp.with_timezone(&Utc)).map_err(
        |error| {
            RepositoryError::Decode(format!("invalid timestamp in `{column}`: `{value}` ({error})"))
        },
    )
}
