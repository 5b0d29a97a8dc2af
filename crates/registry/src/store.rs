//! Concurrent job store.
//!
//! Records live in a `HashMap` behind a `tokio::sync::RwLock`: status
//! reads take the read lock, the two lifecycle writes take the write
//! lock, so a reader never observes a half-written record. Access is
//! always keyed by job id; the only iteration is the eviction sweep.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use integro_core::job::{JobRecord, JobState};
use integro_core::types::{JobId, Timestamp};

/// Errors from lifecycle writes.
///
/// Reads are infallible; a missing record is simply `None`.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Terminal write for an id that was never created.
    #[error("No job record for id {0}")]
    NotFound(JobId),

    /// A second create for an id that already has a record.
    #[error("Job record already exists for id {0}")]
    Duplicate(JobId),

    /// A second terminal write. Transitions are monotonic; a terminal
    /// record is never revisited.
    #[error("Job {0} is already in a terminal state")]
    AlreadyTerminal(JobId),
}

/// Shared, concurrency-safe registry of job records.
///
/// Cheap to clone; all clones share the same map.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<JobId, JobRecord>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the initial `pending` record for a freshly allocated id.
    ///
    /// The submitter is the only caller; exactly one create per job.
    pub async fn create(&self, id: JobId) -> Result<(), RegistryError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        jobs.insert(id, JobRecord::pending());
        Ok(())
    }

    /// Terminal write: `pending -> ready`.
    pub async fn complete(&self, id: JobId, artifact_ref: String) -> Result<(), RegistryError> {
        self.finish(id, JobState::Ready { artifact_ref }).await
    }

    /// Terminal write: `pending -> failed`.
    pub async fn fail(&self, id: JobId, error_detail: String) -> Result<(), RegistryError> {
        self.finish(id, JobState::Failed { error_detail }).await
    }

    async fn finish(&self, id: JobId, terminal: JobState) -> Result<(), RegistryError> {
        debug_assert!(terminal.is_terminal());
        let mut jobs = self.jobs.write().await;
        let record = jobs.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if record.state.is_terminal() {
            return Err(RegistryError::AlreadyTerminal(id));
        }
        record.state = terminal;
        Ok(())
    }

    /// Read the current record for a job id, if one exists.
    pub async fn get(&self, id: JobId) -> Option<JobRecord> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// Number of records currently tracked (for health reporting).
    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Remove terminal records created before `cutoff`.
    ///
    /// Pending records are never evicted, whatever their age; the
    /// worker's terminal write must always find its record.
    pub async fn evict_terminal_before(&self, cutoff: Timestamp) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, record| !(record.state.is_terminal() && record.created_at < cutoff));
        before - jobs.len()
    }
}
