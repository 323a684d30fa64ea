use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shareable code identifying one assignment dropbox.
///
/// Generated once at creation and immutable afterwards. Well-formed ids are
/// six uppercase alphanumeric characters, but the type does not reject other
/// shapes: user-supplied ids flow to the store unchanged and unknown ids are
/// handled as ordinary validation failures there.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SubmissionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub submission_id: SubmissionId,
    pub owner_identity: String,
    pub created_at: DateTime<Utc>,
}

/// Insert form of [`Assignment`]; the store layer assigns `created_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAssignment {
    pub submission_id: SubmissionId,
    pub owner_identity: String,
}
