use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::assignment::SubmissionId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub assignment_submission_id: SubmissionId,
    pub submitter_identity: String,
    pub content_link: String,
    pub submitted_at: DateTime<Utc>,
}

/// Insert form of [`Submission`]; the store layer assigns `submitted_at`.
/// Submissions are append-only: there is no update or delete path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSubmission {
    pub assignment_submission_id: SubmissionId,
    pub submitter_identity: String,
    pub content_link: String,
}
