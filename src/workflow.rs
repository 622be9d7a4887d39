//! Workflow vocabulary: the opaque graph document, the builder
//! capability implemented by concrete job types, and the submission and
//! lifecycle types shared with hosts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A workflow graph as the server understands it.
///
/// The document is caller-supplied and opaque to this crate: nodes,
/// connections and parameters are never interpreted here, only carried
/// to the server verbatim.
pub type Workflow = serde_json::Value;

/// Capability implemented by concrete job types that know how to
/// express themselves as a workflow graph.
///
/// Hosts implement this once per effect and hand instances to
/// [`Client::submit`](crate::Client::submit) instead of wiring JSON by
/// hand at every call site.
pub trait WorkflowBuilder {
    /// Produce the workflow document to submit.
    fn build_workflow(&self) -> Workflow;

    /// Server-side resources (model files, checkpoints) this workflow
    /// depends on. Informational for hosts; nothing here verifies them.
    fn required_resources(&self) -> HashSet<String>;
}

/// A successfully queued job: the server-assigned identifier together
/// with the submitted document and the identity that submitted it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSubmission {
    /// Opaque server-assigned key, used for history lookups.
    pub job_id: String,
    /// The workflow document as submitted.
    pub workflow: Workflow,
    /// Identity the job was submitted under.
    pub client_id: String,
}

// ---------------------------------------------------------------------------
// Execution state
// ---------------------------------------------------------------------------

/// Lifecycle of a submitted job as tracked by the caller.
///
/// The server is never asked for this directly; hosts advance it from
/// `Idle` through `Queuing` and `Processing` as they submit and poll,
/// and settle on `Completed` or `Error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Submission is in flight.
    Queuing,
    /// The server accepted the job; results are being polled for.
    Processing,
    /// A history record with outputs arrived.
    Completed,
    /// Submission or polling failed.
    Error,
}

impl ExecutionState {
    /// Whether the state is a resting point that no further polling
    /// will change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Lowercase label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Queuing => "queuing",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}
