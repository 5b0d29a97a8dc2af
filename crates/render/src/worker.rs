//! Supervised fire-and-forget render dispatch.
//!
//! [`dispatch_render`] is the single handoff point between the submit
//! path and the renderer. The contract: exactly one terminal registry
//! write per job, whichever way the pipeline ends: success, error, or
//! panic. The supervisor task owns that write; the pipeline runs on an
//! inner task so even a panic is observed as a `JoinError` and resolved
//! to `failed`, never leaving a client polling a permanently pending
//! job.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use integro_core::job::RenderRequest;
use integro_core::types::JobId;
use integro_registry::JobRegistry;

use crate::error::RenderError;
use crate::pipeline::RenderPipeline;
use crate::script::SceneScript;

/// Failure detail recorded when the pipeline task itself dies.
const CRASH_DETAIL: &str = "renderer task crashed";

/// Spawn the render for a job and return the supervisor handle.
///
/// The caller (the submit handler) does not await the handle; it exists
/// for tests and shutdown accounting.
pub fn dispatch_render(
    registry: JobRegistry,
    pipeline: Arc<dyn RenderPipeline>,
    job_id: JobId,
    request: RenderRequest,
    output: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let inner = tokio::spawn(run_render(pipeline, request, output.clone()));

        let write = match inner.await {
            Ok(Ok(artifact_ref)) => {
                tracing::info!(%job_id, artifact_ref = %artifact_ref, "Render finished");
                registry.complete(job_id, artifact_ref).await
            }
            Ok(Err(e)) => {
                tracing::warn!(%job_id, error = %e, "Render failed");
                remove_partial(&output).await;
                registry.fail(job_id, e.to_string()).await
            }
            Err(join_err) => {
                tracing::error!(%job_id, error = %join_err, "Render task crashed");
                remove_partial(&output).await;
                registry.fail(job_id, CRASH_DETAIL.to_string()).await
            }
        };

        // The worker is the only terminal writer for this job, so this
        // only fires on a registry invariant violation.
        if let Err(e) = write {
            tracing::error!(%job_id, error = %e, "Terminal status write rejected");
        }
    })
}

async fn run_render(
    pipeline: Arc<dyn RenderPipeline>,
    request: RenderRequest,
    output: PathBuf,
) -> Result<String, RenderError> {
    let script = SceneScript::build(&request)?;
    pipeline.render(&script, &output).await?;
    Ok(output.to_string_lossy().to_string())
}

/// Best-effort removal of a partially-written artifact.
async fn remove_partial(output: &PathBuf) {
    if tokio::fs::remove_file(output).await.is_ok() {
        tracing::debug!(output = %output.display(), "Removed partial artifact");
    }
}
