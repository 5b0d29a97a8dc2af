//! Artifact delivery.
//!
//! ```text
//! GET /{id} -> get_artifact
//! ```
//!
//! Streams the rendered mp4 for a ready job. 404 until the job reaches
//! `ready`; a failed or pending job never serves a partial video.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio_util::io::ReaderStream;

use integro_core::job::JobState;
use integro_core::types::JobId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_artifact))
}

/// GET /api/v1/artifacts/{id}
async fn get_artifact(
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
) -> AppResult<Response> {
    let record = state
        .registry
        .get(job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No job with id {job_id}")))?;

    let JobState::Ready { artifact_ref } = record.state else {
        return Err(AppError::NotFound(format!(
            "Artifact for job {job_id} is not available"
        )));
    };

    let file = tokio::fs::File::open(&artifact_ref).await.map_err(|e| {
        tracing::error!(%job_id, artifact_ref = %artifact_ref, error = %e, "Ready artifact missing on disk");
        AppError::NotFound(format!("Artifact for job {job_id} is not available"))
    })?;

    let stream = ReaderStream::new(file);
    Ok((
        [(header::CONTENT_TYPE, "video/mp4")],
        Body::from_stream(stream),
    )
        .into_response())
}
