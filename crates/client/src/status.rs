//! Fixed-interval status polling.
//!
//! One outstanding request at a time: the next poll is scheduled only
//! after the previous response (or failure) has been handled, which the
//! sequential `await` enforces by construction. Network failures read
//! as "still pending": they are retried on the same cadence and never
//! surfaced as job failures.

use std::time::Duration;

use async_trait::async_trait;

use integro_core::job::strip_error_prefix;
use integro_core::protocol::JobStatus;
use integro_core::types::JobId;

use crate::transport::TransportError;

/// Where status responses come from. Production uses
/// [`crate::ApiClient`]; tests use scripted fakes.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, job_id: JobId) -> Result<JobStatus, TransportError>;
}

/// Polling cadence and bound.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between polls.
    pub interval: Duration,
    /// Give up after this many polls. 900 attempts at the 2s default is
    /// a 30-minute ceiling, so a stalled job cannot hold a client
    /// forever.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 900,
        }
    }
}

/// How a polling session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Terminal success; the artifact is resolvable.
    Ready,
    /// Terminal failure; the detail has the internal prefix stripped.
    Failed(String),
    /// The attempt bound was exhausted without a terminal state.
    TimedOut,
}

/// Polls a [`StatusSource`] until a terminal state is observed.
pub struct StatusPoller<S> {
    source: S,
    config: PollConfig,
}

impl<S: StatusSource> StatusPoller<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, PollConfig::default())
    }

    pub fn with_config(source: S, config: PollConfig) -> Self {
        Self { source, config }
    }

    /// Poll until terminal, returning exactly one outcome.
    pub async fn poll(&self, job_id: JobId) -> PollOutcome {
        for attempt in 1..=self.config.max_attempts {
            match self.source.fetch_status(job_id).await {
                Ok(status) if status.ready => return PollOutcome::Ready,
                Ok(JobStatus {
                    error: Some(message),
                    ..
                }) => {
                    return PollOutcome::Failed(strip_error_prefix(&message).to_string());
                }
                Ok(_) => {
                    tracing::trace!(%job_id, attempt, "Job still pending");
                }
                Err(e) => {
                    // Transient transport failure; retry on the same cadence.
                    tracing::debug!(%job_id, attempt, error = %e, "Status poll failed");
                }
            }
            if attempt < self.config.max_attempts {
                tokio::time::sleep(self.config.interval).await;
            }
        }
        PollOutcome::TimedOut
    }
}
