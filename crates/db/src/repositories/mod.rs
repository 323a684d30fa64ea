use async_trait::async_trait;
use thiserror::Error;

use assigndrop_core::domain::assignment::{Assignment, NewAssignment, SubmissionId};
use assigndrop_core::domain::submission::{NewSubmission, Submission};

pub mod assignment;
pub mod memory;
pub mod submission;

pub use assignment::SqlAssignmentRepository;
pub use memory::{InMemoryAssignmentRepository, InMemorySubmissionRepository};
pub use submission::SqlSubmissionRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("conflicting submission id `{submission_id}`")]
    Conflict { submission_id: SubmissionId },
    #[error("decode error: {0}")]
    Decode(String),
}

/// The record store's three operation shapes, split per table.
///
/// Injected into the workflow engine at construction so tests can substitute
/// the in-memory implementations. Timestamps are assigned here, inside the
/// store layer; callers never supply them.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Inserts a new dropbox. A duplicate `submission_id` yields
    /// [`RepositoryError::Conflict`], which the engine uses to regenerate.
    async fn insert(&self, assignment: NewAssignment) -> Result<Assignment, RepositoryError>;

    async fn exists(&self, submission_id: &SubmissionId) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, RepositoryError>;

    /// Lists submissions for one dropbox, most recent first.
    async fn list_for_assignment(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Submission>, RepositoryError>;
}

#[async_trait]
impl<T> AssignmentRepository for std::sync::Arc<T>
where
    T: AssignmentRepository + ?Sized,
{
    async fn insert(&self, assignment: NewAssignment) -> Result<Assignment, RepositoryError> {
        (**self).insert(assignment).await
    }

    async fn exists(&self, submission_id: &SubmissionId) -> Result<bool, RepositoryError> {
        (**self).exists(submission_id).await
    }
}

#[async_trait]
impl<T> SubmissionRepository for std::sync::Arc<T>
where
    T: SubmissionRepository + ?Sized,
{
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, RepositoryError> {
        (**self).insert(submission).await
    }

    async fn list_for_assignment(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<Submission>, RepositoryError> {
        (**self).list_for_assignment(submission_id).await
    }
}
