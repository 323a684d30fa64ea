//! Assignment Workflow Engine - stateless multi-turn dialogue execution
//!
//! This crate is the working half of the assigndrop system: it takes one
//! structured call per user message and carries the assignment dropbox
//! dialogue forward by exactly one step.
//!
//! # Architecture
//!
//! Each invocation follows a fixed path:
//! 1. **Step decision** - the pure decision table in
//!    `assigndrop_core::workflow` maps the present/absent optional fields to
//!    a `WorkflowStep`. No conversation state is stored anywhere.
//! 2. **Step execution** (`engine`) - the engine runs that step against the
//!    injected repositories: create a dropbox, verify an id, record a
//!    submission, or list submissions.
//! 3. **Response rendering** - outcomes become the user-facing strings in
//!    `assigndrop_core::workflow::responses`.
//!
//! # Key Types
//!
//! - `WorkflowEngine` - the per-call orchestrator (see `engine` module)
//! - `TracingAuditSink` - bridges audit events into structured logs
//!
//! # Robustness Principle
//!
//! Because no per-conversation state exists server-side, every transition is
//! idempotent and recoverable: a dropped message is repaired by repeating
//! the call with one more field filled in. Store failures are converted to
//! the workflow error taxonomy at the point of use and never cross the
//! boundary raw.

pub mod engine;

pub use engine::{TracingAuditSink, WorkflowEngine};
