//! REST calls against the ComfyUI HTTP endpoints.
//!
//! Wraps the three endpoints the client needs on top of the scoped
//! transport: workflow submission (`POST /prompt`), history retrieval
//! (`GET /history/{id}`), and interruption (`POST /interrupt`).
//! Response interpretation is split into pure `parse_*` helpers so the
//! branch-heavy contracts can be tested without a server.

use std::time::Duration;

use serde::Deserialize;

use crate::address::ServerAddress;
use crate::error::{ClientError, Result};
use crate::transport::{self, RawResponse};
use crate::workflow::Workflow;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total request timeout for workflow submission.
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Total request timeout for history retrieval.
const HISTORY_TIMEOUT: Duration = Duration::from_secs(10);

/// Total request timeout for the best-effort interrupt request.
const INTERRUPT_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// History record
// ---------------------------------------------------------------------------

/// Execution results for one job, as recorded by the server's history.
///
/// `outputs` holds per-node results (file names, previews); `status`
/// holds completion metadata. Both stay raw JSON: their inner shape
/// belongs to the server and the nodes in the submitted graph.
///
/// A record with both fields `Null` is the *empty* record: the server
/// has no history for the job. That is the normal answer while a job is
/// still queued or executing; callers keep polling. It is also the
/// answer for an id the server never saw, so an empty record alone
/// never proves the job exists.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryRecord {
    /// Per-node outputs keyed by node id.
    #[serde(default)]
    pub outputs: serde_json::Value,
    /// Completion metadata for the run.
    #[serde(default)]
    pub status: serde_json::Value,
}

impl HistoryRecord {
    /// Whether the server had nothing for the job yet.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_null() && self.status.is_null()
    }
}

// ---------------------------------------------------------------------------
// Endpoint calls
// ---------------------------------------------------------------------------

/// Submit a workflow for execution.
///
/// Sends `POST /prompt` with `{"prompt": workflow, "client_id": ...}`
/// and returns the server-assigned job id.
pub(crate) fn submit_workflow(
    address: &ServerAddress,
    workflow: &Workflow,
    client_id: &str,
) -> Result<String> {
    let body = serde_json::json!({
        "prompt": workflow,
        "client_id": client_id,
    });

    let response = transport::post_json(address, "/prompt", &body, SUBMIT_TIMEOUT)?;
    parse_submit_response(response)
}

/// Retrieve execution history for a job.
///
/// Sends `GET /history/{job_id}`. An id the server has no entry for
/// yields the empty record, not an error.
pub(crate) fn get_history(address: &ServerAddress, job_id: &str) -> Result<HistoryRecord> {
    let response = transport::get(address, &format!("/history/{job_id}"), HISTORY_TIMEOUT)?;
    parse_history_response(response, job_id)
}

/// Ask the server to interrupt the currently running execution.
///
/// Sends `POST /interrupt` with the client id. Best effort: `true` iff
/// the server answered 200; every other outcome is logged and reported
/// as `false`, never as an error.
pub(crate) fn interrupt(address: &ServerAddress, client_id: &str) -> bool {
    let body = serde_json::json!({
        "client_id": client_id,
    });

    match transport::post_json(address, "/interrupt", &body, INTERRUPT_TIMEOUT) {
        Ok(response) if response.status == 200 => true,
        Ok(response) => {
            tracing::warn!(
                status = response.status,
                "Interrupt request was not accepted"
            );
            false
        }
        Err(error) => {
            tracing::warn!(error = %error, "Interrupt request failed to reach the server");
            false
        }
    }
}

// ---- private helpers ----

/// Interpret a `/prompt` response.
///
/// Branch order mirrors the server's contract: a non-200 status wins,
/// then a `prompt_id` field, then an explicit `error` field in an
/// otherwise successful response; anything else is a protocol breach.
fn parse_submit_response(response: RawResponse) -> Result<String> {
    if response.status != 200 {
        return Err(ClientError::Server {
            status: response.status,
            message: response.body,
        });
    }

    let json: serde_json::Value = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Protocol(format!("malformed JSON in submit response: {e}")))?;

    if let Some(prompt_id) = json.get("prompt_id") {
        return match prompt_id.as_str() {
            Some(id) => Ok(id.to_string()),
            None => Err(ClientError::Protocol(format!(
                "prompt_id is not a string: {prompt_id}"
            ))),
        };
    }

    if let Some(error) = json.get("error") {
        // 200 with an error payload still means the submission was refused.
        return Err(ClientError::Server {
            status: response.status,
            message: error.to_string(),
        });
    }

    Err(ClientError::Protocol(
        "submit response contains neither prompt_id nor error".to_string(),
    ))
}

/// Interpret a `/history/{id}` response: the entry keyed by the job id
/// if present, the empty record if not.
fn parse_history_response(response: RawResponse, job_id: &str) -> Result<HistoryRecord> {
    if response.status != 200 {
        return Err(ClientError::Server {
            status: response.status,
            message: response.body,
        });
    }

    let json: serde_json::Value = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Protocol(format!("malformed JSON in history response: {e}")))?;

    match json.get(job_id) {
        Some(entry) => serde_json::from_value(entry.clone()).map_err(|e| {
            ClientError::Protocol(format!(
                "history entry for '{job_id}' has unexpected shape: {e}"
            ))
        }),
        // No entry: still queued, still executing, or never seen.
        None => Ok(HistoryRecord::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    // ---- submit ----

    #[test]
    fn submit_returns_prompt_id() {
        let id = parse_submit_response(response(200, r#"{"prompt_id": "abc123", "number": 4}"#))
            .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn submit_non_200_is_a_server_error_with_the_body() {
        let err = parse_submit_response(response(500, "internal server error")).unwrap_err();
        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal server error");
            }
            other => panic!("Expected Server, got {other:?}"),
        }
    }

    #[test]
    fn submit_malformed_json_is_a_protocol_error() {
        let err = parse_submit_response(response(200, "not json at all")).unwrap_err();
        assert_matches!(err, ClientError::Protocol(_));
    }

    #[test]
    fn submit_error_field_is_a_server_error_despite_200() {
        let body = r#"{"error": {"type": "invalid_prompt", "message": "missing node 7"}}"#;
        let err = parse_submit_response(response(200, body)).unwrap_err();
        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, 200);
                // The error payload is surfaced as compact JSON.
                assert_eq!(
                    message,
                    json!({"type": "invalid_prompt", "message": "missing node 7"}).to_string()
                );
            }
            other => panic!("Expected Server, got {other:?}"),
        }
    }

    #[test]
    fn submit_prompt_id_wins_over_error_field() {
        let body = r#"{"prompt_id": "abc", "error": "ignored"}"#;
        assert_eq!(parse_submit_response(response(200, body)).unwrap(), "abc");
    }

    #[test]
    fn submit_non_string_prompt_id_is_a_protocol_error() {
        let err = parse_submit_response(response(200, r#"{"prompt_id": 42}"#)).unwrap_err();
        assert_matches!(err, ClientError::Protocol(_));
    }

    #[test]
    fn submit_without_prompt_id_or_error_is_a_protocol_error() {
        let err = parse_submit_response(response(200, r#"{"number": 1}"#)).unwrap_err();
        match err {
            ClientError::Protocol(message) => {
                assert!(message.contains("neither prompt_id nor error"));
            }
            other => panic!("Expected Protocol, got {other:?}"),
        }
    }

    // ---- history ----

    #[test]
    fn history_entry_for_the_job_is_deserialized() {
        let body = json!({
            "abc123": {
                "prompt": ["echo of the submission"],
                "outputs": {"9": {"images": [{"filename": "out_00001.png"}]}},
                "status": {"completed": true},
            }
        })
        .to_string();

        let record = parse_history_response(response(200, &body), "abc123").unwrap();
        assert!(!record.is_empty());
        assert_eq!(record.outputs["9"]["images"][0]["filename"], "out_00001.png");
        assert_eq!(record.status["completed"], true);
    }

    #[test]
    fn history_without_the_job_is_the_empty_record() {
        let record = parse_history_response(response(200, "{}"), "missing").unwrap();
        assert!(record.is_empty());
        assert_eq!(record, HistoryRecord::default());
    }

    #[test]
    fn history_with_other_jobs_only_is_still_empty_for_ours() {
        let body = json!({"other_job": {"outputs": {}, "status": {}}}).to_string();
        let record = parse_history_response(response(200, &body), "abc123").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn history_non_200_is_a_server_error() {
        let err = parse_history_response(response(502, "bad gateway"), "abc").unwrap_err();
        assert_matches!(err, ClientError::Server { status: 502, .. });
    }

    #[test]
    fn history_malformed_json_is_a_protocol_error() {
        let err = parse_history_response(response(200, "<html>"), "abc").unwrap_err();
        assert_matches!(err, ClientError::Protocol(_));
    }

    #[test]
    fn history_entry_that_is_not_an_object_is_a_protocol_error() {
        let body = json!({"abc": "not an object"}).to_string();
        let err = parse_history_response(response(200, &body), "abc").unwrap_err();
        assert_matches!(err, ClientError::Protocol(_));
    }

    #[test]
    fn history_entry_missing_fields_defaults_them_to_null() {
        let body = json!({"abc": {"outputs": {"1": {}}}}).to_string();
        let record = parse_history_response(response(200, &body), "abc").unwrap();
        assert!(record.status.is_null());
        assert!(!record.is_empty());
    }

    // ---- record emptiness ----

    #[test]
    fn default_record_is_empty() {
        assert!(HistoryRecord::default().is_empty());
    }

    #[test]
    fn record_with_status_only_is_not_empty() {
        let record = HistoryRecord {
            outputs: serde_json::Value::Null,
            status: json!({"completed": false}),
        };
        assert!(!record.is_empty());
    }
}
