use chrono::Utc;
use tokio::sync::RwLock;

use assigndrop_core::domain::assignment::{Assignment, NewAssignment, SubmissionId};
use assigndrop_core::domain::submission::{NewSubmission, Submission};

use super::{AssignmentRepository, RepositoryError, SubmissionRepository};

/// In-memory store fakes mirroring the SQL repositories' contract, including
/// store-assigned timestamps and the uniqueness conflict on dropbox ids.

#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    rows: RwLock<Vec<Assignment>>,
}

impl InMemoryAssignmentRepository {
    pub async fn all(&self) -> Vec<Assignment> {
        self.rows.read().await.clone()
    }
}

#[async_trait::async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn insert(&self, assignment: NewAssignment) -> Result<Assignment, RepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.submission_id == assignment.submission_id) {
            return Err(RepositoryError::Conflict { submission_id: assignment.submission_id });
        }

        let stored = Assignment {
            submission_id: assignment.submission_id,
            owner_identity: assignment.owner_identity,
            created_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn exists(&self, submission_id: &SubmissionId) -> Result<bool, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().any(|row| &row.submission_id == submission_id))
    }
}

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    rows: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionRepository {
    pub async fn all(&self) -> Vec<Submission> {
        self.rows.read().await.clone()
    }

    /// Test fixture path: inserts a fully-formed submission, timestamp
    /// included, bypassing the store-assigned clock.
    pub async fn seed(&self, submission: Submission) {
        self.rows.write().await.push(submission);
    }
}

#[async_trait::async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, RepositoryError> {
        let stored = Submission {
            assignment_submission_id: submission.assignment_submission_id,
            submitter_identity: submission.submitter_identity,
            content_link: submission.content_link,
            submitted_at: Utc::now(),
        };
        self.rows.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_assignment(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Submission>, RepositoryError> {
        let rows = self.rows.read().await;
        let mut matching = rows
            .iter()
            .filter(|row| &row.assignment_submission_id == submission_id)
            .cloned()
            .collect::<Vec<_>>();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(matching)
    }
}
