pub mod artifacts;
pub mod health;
pub mod jobs;
pub mod preview;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /preview                   preview (POST, stateless)
///
/// /jobs                      submit (POST)
/// /jobs/{id}/status          status poll (GET)
/// /jobs/{id}/result          result view (GET)
///
/// /artifacts/{id}            rendered video (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(preview::router())
        .nest("/jobs", jobs::router())
        .nest("/artifacts", artifacts::router())
}
