//! Routes and handlers for the `/jobs` resource.
//!
//! ```text
//! POST /                 -> submit_job
//! GET  /{id}/status      -> job_status
//! GET  /{id}/result      -> job_result
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use integro_core::job::RenderRequest;
use integro_core::protocol::{JobStatus, ResultView};
use integro_core::types::JobId;
use integro_core::validation::validate_submission;
use integro_render::worker::dispatch_render;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_job))
        .route("/{id}/status", get(job_status))
        .route("/{id}/result", get(job_result))
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// Raw form fields as submitted by the client.
#[derive(Debug, Deserialize)]
pub struct SubmitJobRequest {
    pub integrand: String,
    #[serde(default = "default_variable")]
    pub variable: String,
    pub lower: String,
    pub upper: String,
}

fn default_variable() -> String {
    "x".to_string()
}

#[derive(Debug, Serialize)]
pub struct SubmittedJob {
    pub job_id: JobId,
}

/// POST /api/v1/jobs
///
/// Validate the form fields syntactically, create a `pending` job
/// record, and dispatch the render off the request path. Returns 201
/// with the job id; the client then loads the result view for it.
/// Validation failure returns 400 before any record is created.
async fn submit_job(
    State(state): State<AppState>,
    Json(input): Json<SubmitJobRequest>,
) -> AppResult<impl IntoResponse> {
    let request = RenderRequest {
        integrand: input.integrand.trim().to_string(),
        variable: input.variable.trim().to_string(),
        lower: input.lower.trim().to_string(),
        upper: input.upper.trim().to_string(),
    };
    validate_submission(&request)?;

    let job_id = JobId::new();
    state.registry.create(job_id).await?;

    let output = state.config.artifact_dir.join(format!("{job_id}.mp4"));
    // Fire-and-forget: the supervisor task owns the terminal write.
    let _ = dispatch_render(
        state.registry.clone(),
        Arc::clone(&state.pipeline),
        job_id,
        request,
        output,
    );

    tracing::info!(%job_id, "Render job submitted");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmittedJob { job_id },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}/status
///
/// The polling endpoint. An id the registry has no record for reads as
/// pending; a status poll racing job creation (or arriving after
/// eviction) must not error.
async fn job_status(State(state): State<AppState>, Path(job_id): Path<JobId>) -> Json<JobStatus> {
    let status = match state.registry.get(job_id).await {
        Some(record) => JobStatus::from_state(&record.state),
        None => JobStatus::pending(),
    };
    Json(status)
}

// ---------------------------------------------------------------------------
// Result view
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}/result
///
/// The result view contract: carries the `ready` flag the client checks
/// before deciding whether to start polling at all.
async fn job_result(State(state): State<AppState>, Path(job_id): Path<JobId>) -> Json<ResultView> {
    let ready = state
        .registry
        .get(job_id)
        .await
        .is_some_and(|record| record.state.is_ready());

    Json(ResultView {
        job_id,
        ready,
        video_url: format!("/api/v1/artifacts/{job_id}"),
    })
}
