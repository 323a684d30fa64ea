use thiserror::Error;

/// Store operation that was in flight when a storage failure surfaced.
///
/// The engine never retries a failed store call and never leaks the
/// underlying store error type; callers only see the operation label and a
/// user-safe message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageOp {
    CreateAssignment,
    VerifyAssignment,
    RecordSubmission,
    ListSubmissions,
}

impl StorageOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateAssignment => "create-assignment",
            Self::VerifyAssignment => "verify-assignment",
            Self::RecordSubmission => "record-submission",
            Self::ListSubmissions => "list-submissions",
        }
    }
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("storage failure during {op}: {message}")]
    Storage { op: StorageOp, message: String },
    #[error("unknown intent `{given}` (expected create|submit|view)")]
    InvalidIntent { given: String },
}

impl WorkflowError {
    pub fn storage(op: StorageOp, message: impl Into<String>) -> Self {
        Self::Storage { op, message: message.into() }
    }

    /// Short apologetic copy safe to show to the end user; the detailed
    /// message stays in logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Storage { op: StorageOp::CreateAssignment, .. } => {
                "I'm sorry, I encountered a database error and couldn't create the assignment. \
                 Please try again later."
            }
            Self::Storage { op: StorageOp::VerifyAssignment, .. } => {
                "I'm having trouble verifying the assignment ID right now. \
                 Please try again in a moment."
            }
            Self::Storage { op: StorageOp::RecordSubmission, .. } => {
                "I'm sorry, there was a problem saving your submission. \
                 Please try sending the link again."
            }
            Self::Storage { op: StorageOp::ListSubmissions, .. } => {
                "Sorry, I couldn't fetch the submissions due to a database error. \
                 Please try again."
            }
            Self::InvalidIntent { .. } => {
                "I'm not sure how to help with that. You can ask me to 'create', 'submit', \
                 or 'view' an assignment."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StorageOp, WorkflowError};

    #[test]
    fn storage_failure_has_operation_scoped_user_message() {
        let error = WorkflowError::storage(StorageOp::RecordSubmission, "disk full");
        assert!(error.user_message().contains("saving your submission"));
        assert!(error.to_string().contains("record-submission"));
        assert!(error.to_string().contains("disk full"));
    }

    #[test]
    fn invalid_intent_message_lists_known_intents() {
        let error = WorkflowError::InvalidIntent { given: "delete".to_string() };
        assert!(error.user_message().contains("'create'"));
        assert!(error.user_message().contains("'submit'"));
        assert!(error.user_message().contains("'view'"));
    }

    #[test]
    fn user_messages_never_echo_store_details() {
        let error = WorkflowError::storage(StorageOp::VerifyAssignment, "SQLITE_BUSY (5)");
        assert!(!error.user_message().contains("SQLITE_BUSY"));
    }
}
