//! Wire types for the client synchronization protocol.
//!
//! Shared between the API handlers (serialization) and the client crate
//! (deserialization) so both sides agree on the exact shapes.

use serde::{Deserialize, Serialize};

use crate::job::{prefix_error_detail, JobState};
use crate::types::JobId;

// ---------------------------------------------------------------------------
// Status endpoint
// ---------------------------------------------------------------------------

/// Body of `GET /api/v1/jobs/{id}/status`.
///
/// Three shapes, one struct:
///
/// - ready:   `{ "ready": true,  "error": null }`
/// - failed:  `{ "ready": false, "error": "error:<detail>" }`
/// - pending: `{ "ready": false, "error": null }`
///
/// The `error` message carries the internal `error:` tag on the wire;
/// clients strip it before display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub ready: bool,
    pub error: Option<String>,
}

impl JobStatus {
    /// A job the registry has no terminal state for yet.
    pub fn pending() -> Self {
        Self {
            ready: false,
            error: None,
        }
    }

    /// Project a job state onto the status wire shape.
    pub fn from_state(state: &JobState) -> Self {
        match state {
            JobState::Pending => Self::pending(),
            JobState::Ready { .. } => Self {
                ready: true,
                error: None,
            },
            JobState::Failed { error_detail } => Self {
                ready: false,
                error: Some(prefix_error_detail(error_detail)),
            },
        }
    }

    /// Whether this response is terminal (polling should stop).
    pub fn is_terminal(&self) -> bool {
        self.ready || self.error.is_some()
    }
}

// ---------------------------------------------------------------------------
// Result view
// ---------------------------------------------------------------------------

/// Body of `GET /api/v1/jobs/{id}/result` -- the result view contract.
///
/// When `ready` is already true at view load, the client presents the
/// video directly and never starts the poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    pub job_id: JobId,
    pub ready: bool,
    /// Artifact URL, resolvable once the job is ready. Clients append a
    /// cache-busting token before handing it to a playback element.
    pub video_url: String,
}

// ---------------------------------------------------------------------------
// Preview endpoint
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/preview` -- the stateless preview request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub integrand: String,
    #[serde(default)]
    pub variable: String,
    #[serde(default)]
    pub lower: String,
    #[serde(default)]
    pub upper: String,
}

/// Response of the preview endpoint.
///
/// `expr` is the normalized LaTeX rendering of the integrand, or empty
/// when the integrand is empty or unparseable. Bounds are normalized
/// when they parse and passed through as raw text otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub expr: String,
    pub lower: String,
    pub upper: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_status_is_not_terminal() {
        let status = JobStatus::pending();
        assert!(!status.is_terminal());
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({ "ready": false, "error": null }),
        );
    }

    #[test]
    fn ready_status_is_terminal() {
        let status = JobStatus::from_state(&JobState::Ready {
            artifact_ref: "out.mp4".into(),
        });
        assert!(status.is_terminal());
        assert!(status.ready);
        assert!(status.error.is_none());
    }

    #[test]
    fn failed_status_carries_prefixed_error() {
        let status = JobStatus::from_state(&JobState::Failed {
            error_detail: "renderer exploded".into(),
        });
        assert!(status.is_terminal());
        assert!(!status.ready);
        assert_eq!(status.error.as_deref(), Some("error:renderer exploded"));
    }
}
