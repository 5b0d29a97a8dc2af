//! The render pipeline seam.
//!
//! Video production is slow, fallible, and out-of-process; everything
//! behind this trait is a collaborator. The worker and the API only
//! depend on the trait, so tests substitute an in-process fake.

use std::path::Path;

use async_trait::async_trait;

use crate::error::RenderError;
use crate::script::SceneScript;

/// Produces a video file for a scene script.
///
/// Contract: on `Ok(())` the artifact exists at `output`; on `Err` the
/// implementation makes no promise about `output` (the worker removes
/// partial files).
#[async_trait]
pub trait RenderPipeline: Send + Sync {
    async fn render(&self, script: &SceneScript, output: &Path) -> Result<(), RenderError>;
}
