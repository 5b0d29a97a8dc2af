use std::sync::Arc;

use integro_registry::JobRegistry;
use integro_render::RenderPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The job registry, the single source of truth for job status.
    pub registry: JobRegistry,
    /// Render pipeline handed to each dispatched worker.
    pub pipeline: Arc<dyn RenderPipeline>,
}
