use serde::{Deserialize, Serialize};

use crate::errors::WorkflowError;

/// Caller-declared action category for one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Create,
    Submit,
    View,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Submit => "submit",
            Self::View => "view",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = WorkflowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "submit" => Ok(Self::Submit),
            "view" => Ok(Self::View),
            other => Err(WorkflowError::InvalidIntent { given: other.to_string() }),
        }
    }
}

/// One structured engine invocation: the user's identity plus whatever
/// optional arguments this turn of the conversation carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowRequest {
    pub caller_identity: String,
    pub intent: Option<Intent>,
    pub assignment_id: Option<String>,
    pub submission_link: Option<String>,
}

impl WorkflowRequest {
    pub fn new(caller_identity: impl Into<String>, intent: Option<Intent>) -> Self {
        Self {
            caller_identity: caller_identity.into(),
            intent,
            assignment_id: None,
            submission_link: None,
        }
    }

    pub fn with_assignment_id(mut self, assignment_id: impl Into<String>) -> Self {
        self.assignment_id = Some(assignment_id.into());
        self
    }

    pub fn with_submission_link(mut self, submission_link: impl Into<String>) -> Self {
        self.submission_link = Some(submission_link.into());
        self
    }
}

/// Next action for one call, decided purely from which fields are present.
///
/// There is no stored conversation state: repeating a call with one more
/// field filled in advances the dialogue, and dropping a message leaves
/// nothing to corrupt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkflowStep {
    Greet,
    CreateDropbox,
    PromptForAssignmentId(Intent),
    VerifyThenPromptForLink { assignment_id: String },
    RecordSubmission { assignment_id: String, content_link: String },
    ListSubmissions { assignment_id: String },
}

/// The stepwise-disclosure decision table.
pub fn next_step(
    intent: Option<Intent>,
    assignment_id: Option<&str>,
    submission_link: Option<&str>,
) -> WorkflowStep {
    match (intent, assignment_id, submission_link) {
        (None, _, _) => WorkflowStep::Greet,
        (Some(Intent::Create), _, _) => WorkflowStep::CreateDropbox,
        (Some(Intent::Submit), None, _) => WorkflowStep::PromptForAssignmentId(Intent::Submit),
        (Some(Intent::Submit), Some(id), None) => {
            WorkflowStep::VerifyThenPromptForLink { assignment_id: id.to_string() }
        }
        (Some(Intent::Submit), Some(id), Some(link)) => WorkflowStep::RecordSubmission {
            assignment_id: id.to_string(),
            content_link: link.to_string(),
        },
        (Some(Intent::View), None, _) => WorkflowStep::PromptForAssignmentId(Intent::View),
        (Some(Intent::View), Some(id), _) => {
            WorkflowStep::ListSubmissions { assignment_id: id.to_string() }
        }
    }
}

impl WorkflowRequest {
    pub fn next_step(&self) -> WorkflowStep {
        next_step(self.intent, self.assignment_id.as_deref(), self.submission_link.as_deref())
    }
}
