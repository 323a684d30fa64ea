use tracing::{debug, warn};

use assigndrop_core::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink};
use assigndrop_core::domain::assignment::{NewAssignment, SubmissionId};
use assigndrop_core::domain::submission::NewSubmission;
use assigndrop_core::errors::{StorageOp, WorkflowError};
use assigndrop_core::ids::{RandomSubmissionIds, SubmissionIdSource};
use assigndrop_core::workflow::{responses, WorkflowRequest, WorkflowStep};
use assigndrop_db::repositories::{
    AssignmentRepository, RepositoryError, SubmissionRepository,
};

/// Attempts allowed when a freshly generated id collides. Collisions are
/// conflicts reported by the store, not something generation checks up front.
const MAX_ID_ATTEMPTS: u32 = 3;

/// Executes one workflow step per call against the injected record store.
///
/// The engine owns no state between calls; two invocations may run
/// concurrently against the same dropbox and consistency is the store's
/// concern.
pub struct WorkflowEngine<A, S, G = RandomSubmissionIds> {
    assignments: A,
    submissions: S,
    ids: G,
}

impl<A, S> WorkflowEngine<A, S>
where
    A: AssignmentRepository,
    S: SubmissionRepository,
{
    pub fn new(assignments: A, submissions: S) -> Self {
        Self { assignments, submissions, ids: RandomSubmissionIds }
    }
}

impl<A, S, G> WorkflowEngine<A, S, G>
where
    A: AssignmentRepository,
    S: SubmissionRepository,
    G: SubmissionIdSource,
{
    pub fn with_id_source(assignments: A, submissions: S, ids: G) -> Self {
        Self { assignments, submissions, ids }
    }

    /// Handles one structured call and returns the response to relay to the
    /// user. Soft input problems (unknown assignment id) come back as
    /// ordinary responses; store failures and unknown intents are errors.
    pub async fn handle(&self, request: &WorkflowRequest) -> Result<String, WorkflowError> {
        let step = request.next_step();
        debug!(caller = %request.caller_identity, step = ?step, "workflow step decided");

        match step {
            WorkflowStep::Greet => Ok(responses::greeting()),
            WorkflowStep::CreateDropbox => self.create_dropbox(&request.caller_identity).await,
            WorkflowStep::PromptForAssignmentId(intent) => {
                Ok(responses::prompt_for_assignment_id(intent))
            }
            WorkflowStep::VerifyThenPromptForLink { assignment_id } => {
                if !self.assignment_exists(&assignment_id).await? {
                    return Ok(responses::unknown_assignment(&assignment_id));
                }
                Ok(responses::prompt_for_link())
            }
            WorkflowStep::RecordSubmission { assignment_id, content_link } => {
                if !self.assignment_exists(&assignment_id).await? {
                    return Ok(responses::unknown_assignment(&assignment_id));
                }
                self.record_submission(&request.caller_identity, &assignment_id, content_link)
                    .await
            }
            WorkflowStep::ListSubmissions { assignment_id } => {
                self.list_submissions(&assignment_id).await
            }
        }
    }

    /// [`handle`](Self::handle) plus an audit event describing the outcome.
    pub async fn handle_with_audit<K>(
        &self,
        request: &WorkflowRequest,
        sink: &K,
        correlation_id: &str,
    ) -> Result<String, WorkflowError>
    where
        K: AuditSink,
    {
        let result = self.handle(request).await;
        let assignment_id = request.assignment_id.as_deref().map(SubmissionId::from);
        let intent = request.intent.map(|intent| intent.as_str()).unwrap_or("none");

        match &result {
            Ok(_) => sink.emit(
                AuditEvent::new(
                    assignment_id,
                    correlation_id,
                    "workflow.intent_handled",
                    AuditCategory::Workflow,
                    request.caller_identity.clone(),
                    AuditOutcome::Success,
                )
                .with_metadata("intent", intent),
            ),
            Err(error) => sink.emit(
                AuditEvent::new(
                    assignment_id,
                    correlation_id,
                    "workflow.intent_failed",
                    AuditCategory::Persistence,
                    request.caller_identity.clone(),
                    AuditOutcome::Failed,
                )
                .with_metadata("intent", intent)
                .with_metadata("error", error.to_string()),
            ),
        }
        result
    }

    async fn create_dropbox(&self, owner_identity: &str) -> Result<String, WorkflowError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let submission_id = self.ids.next_id();
            let attempt = self
                .assignments
                .insert(NewAssignment {
                    submission_id: submission_id.clone(),
                    owner_identity: owner_identity.to_string(),
                })
                .await;

            match attempt {
                Ok(created) => {
                    debug!(submission_id = %created.submission_id, "assignment dropbox created");
                    return Ok(responses::dropbox_created(&created.submission_id));
                }
                Err(RepositoryError::Conflict { submission_id }) => {
                    warn!(submission_id = %submission_id, "submission id collision, regenerating");
                    continue;
                }
                Err(error) => {
                    return Err(storage_failure(StorageOp::CreateAssignment, error));
                }
            }
        }

        Err(WorkflowError::storage(
            StorageOp::CreateAssignment,
            format!("exhausted {MAX_ID_ATTEMPTS} submission id attempts"),
        ))
    }

    async fn assignment_exists(&self, assignment_id: &str) -> Result<bool, WorkflowError> {
        self.assignments
            .exists(&SubmissionId::from(assignment_id))
            .await
            .map_err(|error| storage_failure(StorageOp::VerifyAssignment, error))
    }

    async fn record_submission(
        &self,
        submitter_identity: &str,
        assignment_id: &str,
        content_link: String,
    ) -> Result<String, WorkflowError> {
        self.submissions
            .insert(NewSubmission {
                assignment_submission_id: SubmissionId::from(assignment_id),
                submitter_identity: submitter_identity.to_string(),
                content_link,
            })
            .await
            .map_err(|error| storage_failure(StorageOp::RecordSubmission, error))?;

        Ok(responses::submission_received())
    }

    async fn list_submissions(&self, assignment_id: &str) -> Result<String, WorkflowError> {
        let submissions = self
            .submissions
            .list_for_assignment(&SubmissionId::from(assignment_id))
            .await
            .map_err(|error| storage_failure(StorageOp::ListSubmissions, error))?;

        // An unknown id and a valid-but-empty dropbox intentionally render
        // the same soft message here; only the submit path rejects unknown
        // ids outright.
        if submissions.is_empty() {
            return Ok(responses::no_submissions_yet(assignment_id));
        }

        Ok(responses::submission_list(assignment_id, &submissions))
    }
}

fn storage_failure(op: StorageOp, error: RepositoryError) -> WorkflowError {
    warn!(op = %op, error = %error, "store operation failed");
    WorkflowError::storage(op, error.to_string())
}

/// Forwards audit events into structured tracing logs for the runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, event: AuditEvent) {
        tracing::info!(
            event_name = %event.event_type,
            correlation_id = %event.correlation_id,
            assignment_id = event.assignment_id.as_ref().map(SubmissionId::as_str).unwrap_or("unknown"),
            actor = %event.actor,
            outcome = ?event.outcome,
            "workflow audit event"
        );
    }
}
