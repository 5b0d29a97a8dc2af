//! Integration tests for the job lifecycle: submit, status polling,
//! result view, and artifact delivery.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use common::{body_bytes, body_json, get, post_json, StubPipeline};
use serde_json::json;

fn test_app(pipeline: StubPipeline) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app(Arc::new(pipeline), dir.path().to_path_buf());
    (app, dir)
}

fn submission() -> serde_json::Value {
    json!({
        "integrand": "3x*sin(x)",
        "variable": "x",
        "lower": "0",
        "upper": "pi",
    })
}

/// Submit and return the allocated job id.
async fn submit(app: &Router) -> String {
    let response = post_json(app.clone(), "/api/v1/jobs", submission()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["job_id"]
        .as_str()
        .expect("job_id is a string")
        .to_string()
}

/// Poll the status endpoint until the job reaches a terminal state.
async fn wait_for_terminal(app: &Router, job_id: &str) -> serde_json::Value {
    for _ in 0..200 {
        let response = get(app.clone(), &format!("/api/v1/jobs/{job_id}/status")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        if json["ready"] == true || !json["error"].is_null() {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} never reached a terminal state");
}

// ---------------------------------------------------------------------------
// Submit validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_rejects_empty_integrand_without_creating_a_job() {
    let (app, _dir) = test_app(StubPipeline::Succeed);

    let response = post_json(
        app.clone(),
        "/api/v1/jobs",
        json!({ "integrand": "  ", "variable": "x", "lower": "0", "upper": "1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // No record was created.
    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["jobs_tracked"], 0);
}

#[tokio::test]
async fn submit_rejects_unparseable_bound() {
    let (app, _dir) = test_app(StubPipeline::Succeed);

    let response = post_json(
        app,
        "/api/v1/jobs",
        json!({ "integrand": "x", "variable": "x", "lower": "1+", "upper": "2" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_rejects_empty_bound() {
    let (app, _dir) = test_app(StubPipeline::Succeed);

    let response = post_json(
        app,
        "/api/v1/jobs",
        json!({ "integrand": "x", "variable": "x", "lower": "", "upper": "1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Lifecycle: pending -> ready
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submitted_job_becomes_ready_and_serves_the_artifact() {
    let (app, _dir) = test_app(StubPipeline::Succeed);

    let job_id = submit(&app).await;

    let status = wait_for_terminal(&app, &job_id).await;
    assert_eq!(status, json!({ "ready": true, "error": null }));

    // Result view now reports ready with the artifact URL.
    let result = body_json(get(app.clone(), &format!("/api/v1/jobs/{job_id}/result")).await).await;
    assert_eq!(result["ready"], true);
    assert_eq!(result["job_id"], job_id);
    assert_eq!(result["video_url"], format!("/api/v1/artifacts/{job_id}"));

    // The artifact streams as mp4.
    let artifact = get(app, &format!("/api/v1/artifacts/{job_id}")).await;
    assert_eq!(artifact.status(), StatusCode::OK);
    assert_eq!(
        artifact.headers().get("content-type").unwrap(),
        "video/mp4"
    );
    assert_eq!(body_bytes(artifact).await, b"mp4 bytes");
}

// ---------------------------------------------------------------------------
// Lifecycle: pending -> failed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_render_reports_a_prefixed_error_and_no_artifact() {
    let (app, _dir) = test_app(StubPipeline::Fail("scene compilation failed"));

    let job_id = submit(&app).await;

    let status = wait_for_terminal(&app, &job_id).await;
    assert_eq!(status["ready"], false);
    let message = status["error"].as_str().expect("error is a string");
    assert!(message.starts_with("error:"), "wire error carries the tag");
    assert!(message.contains("scene compilation failed"));

    // A failed job never serves a video.
    let artifact = get(app, &format!("/api/v1/artifacts/{job_id}")).await;
    assert_eq!(artifact.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Pending behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pending_job_reports_neither_ready_nor_error() {
    let (app, _dir) = test_app(StubPipeline::Block);

    let job_id = submit(&app).await;

    let status = body_json(get(app.clone(), &format!("/api/v1/jobs/{job_id}/status")).await).await;
    assert_eq!(status, json!({ "ready": false, "error": null }));

    let result = body_json(get(app.clone(), &format!("/api/v1/jobs/{job_id}/result")).await).await;
    assert_eq!(result["ready"], false);

    let artifact = get(app, &format!("/api/v1/artifacts/{job_id}")).await;
    assert_eq!(artifact.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_job_id_reads_as_pending() {
    let (app, _dir) = test_app(StubPipeline::Succeed);

    let response = get(
        app,
        "/api/v1/jobs/00000000-0000-4000-8000-000000000000/status",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({ "ready": false, "error": null }));
}

#[tokio::test]
async fn malformed_job_id_is_rejected() {
    let (app, _dir) = test_app(StubPipeline::Succeed);

    let response = get(app, "/api/v1/jobs/not-a-uuid/status").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
