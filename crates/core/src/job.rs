//! Job lifecycle model.
//!
//! A job moves through exactly one of two paths:
//!
//! ```text
//! pending ──► ready   (artifact written)
//! pending ──► failed  (error detail recorded)
//! ```
//!
//! Both `ready` and `failed` are terminal. The terminal payload lives in
//! the [`JobState`] variant itself, so a record can never carry both an
//! artifact reference and an error detail, or either while still pending.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Internal tag prepended to an error detail on the status wire.
///
/// Fixed six characters; clients strip it before display.
pub const ERROR_DETAIL_PREFIX: &str = "error:";

// ---------------------------------------------------------------------------
// JobState
// ---------------------------------------------------------------------------

/// Current position of a job in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobState {
    /// Created, render not yet finished.
    Pending,
    /// Render finished; `artifact_ref` locates the video file.
    Ready { artifact_ref: String },
    /// Render failed; `error_detail` is the un-prefixed cause.
    Failed { error_detail: String },
}

impl JobState {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, JobState::Ready { .. })
    }
}

// ---------------------------------------------------------------------------
// JobRecord
// ---------------------------------------------------------------------------

/// One entry in the job registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(flatten)]
    pub state: JobState,
    pub created_at: Timestamp,
}

impl JobRecord {
    /// A freshly submitted record.
    pub fn pending() -> Self {
        Self {
            state: JobState::Pending,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error detail prefix helpers
// ---------------------------------------------------------------------------

/// Prepend the internal tag for the status wire.
pub fn prefix_error_detail(detail: &str) -> String {
    format!("{ERROR_DETAIL_PREFIX}{detail}")
}

/// Strip the internal tag from a wire message, if present.
pub fn strip_error_prefix(message: &str) -> &str {
    message.strip_prefix(ERROR_DETAIL_PREFIX).unwrap_or(message)
}

// ---------------------------------------------------------------------------
// RenderRequest
// ---------------------------------------------------------------------------

/// The validated parameters handed to the renderer worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Raw integrand text, e.g. `3x*sin(x)`.
    pub integrand: String,
    /// Integration variable, e.g. `x`.
    pub variable: String,
    /// Lower bound expression text.
    pub lower: String,
    /// Upper bound expression text.
    pub upper: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_terminal() {
        assert!(!JobState::Pending.is_terminal());
    }

    #[test]
    fn ready_and_failed_are_terminal() {
        let ready = JobState::Ready {
            artifact_ref: "videos/a.mp4".into(),
        };
        let failed = JobState::Failed {
            error_detail: "boom".into(),
        };
        assert!(ready.is_terminal());
        assert!(ready.is_ready());
        assert!(failed.is_terminal());
        assert!(!failed.is_ready());
    }

    #[test]
    fn prefix_is_six_characters() {
        // The client strips a fixed-length tag; keep it stable.
        assert_eq!(ERROR_DETAIL_PREFIX.len(), 6);
    }

    #[test]
    fn strip_removes_prefix_once() {
        assert_eq!(strip_error_prefix("error:division by zero"), "division by zero");
        assert_eq!(strip_error_prefix("error:error:x"), "error:x");
    }

    #[test]
    fn strip_passes_through_unprefixed_messages() {
        assert_eq!(strip_error_prefix("plain message"), "plain message");
    }

    #[test]
    fn record_serializes_with_flattened_status() {
        let record = JobRecord {
            state: JobState::Ready {
                artifact_ref: "videos/a.mp4".into(),
            },
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["artifact_ref"], "videos/a.mp4");
    }
}
