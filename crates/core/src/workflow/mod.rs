pub mod responses;
pub mod steps;

pub use steps::{next_step, Intent, WorkflowRequest, WorkflowStep};
