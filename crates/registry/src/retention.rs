//! Periodic eviction of old terminal job records.
//!
//! Spawned from the API entrypoint via `tokio::spawn`. Runs on a fixed
//! interval until the [`CancellationToken`] is triggered. Records still
//! visible to an open result page are unaffected in practice: the sweep
//! only removes terminal records older than the retention window.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::store::JobRegistry;

/// How often the eviction sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the retention sweep loop.
///
/// Evicts terminal records older than `retention`. Runs until `cancel`
/// is triggered.
pub async fn run(registry: JobRegistry, retention: chrono::Duration, cancel: CancellationToken) {
    tracing::info!(
        retention_hours = retention.num_hours(),
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Job retention sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job retention sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - retention;
                let evicted = registry.evict_terminal_before(cutoff).await;
                if evicted > 0 {
                    tracing::info!(evicted, "Job retention: evicted old records");
                } else {
                    tracing::debug!("Job retention: nothing to evict");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use integro_core::types::JobId;

    #[tokio::test]
    async fn sweep_stops_on_cancellation() {
        let registry = JobRegistry::new();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run(
            registry.clone(),
            chrono::Duration::hours(24),
            cancel.clone(),
        ));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweep should stop promptly")
            .expect("sweep task should not panic");
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_evicts_on_each_tick() {
        let registry = JobRegistry::new();
        let cancel = CancellationToken::new();

        let id = JobId::new();
        registry.create(id).await.unwrap();
        registry.complete(id, "a.mp4".into()).await.unwrap();

        // Zero retention: anything terminal is already past the cutoff.
        let handle = tokio::spawn(run(
            registry.clone(),
            chrono::Duration::zero(),
            cancel.clone(),
        ));

        // First tick fires immediately; let the spawned task run it.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(registry.get(id).await.is_none());

        cancel.cancel();
        handle.await.unwrap();
    }
}
