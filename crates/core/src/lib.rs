pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ids;
pub mod workflow;

pub use domain::assignment::{Assignment, NewAssignment, SubmissionId};
pub use domain::submission::{NewSubmission, Submission};
pub use errors::{StorageOp, WorkflowError};
pub use ids::{RandomSubmissionIds, SubmissionIdSource, SUBMISSION_ID_LEN};
pub use workflow::steps::{Intent, WorkflowRequest, WorkflowStep};
