//! Command-based render pipeline.
//!
//! Invokes an external renderer binary with the scene script as JSON.
//! Invocation shape:
//!
//! ```text
//! <program> --script '<json>' --output <path>
//! ```

use std::path::Path;

use async_trait::async_trait;

use crate::error::RenderError;
use crate::pipeline::RenderPipeline;
use crate::script::SceneScript;

/// Renderer binary used when `RENDERER_CMD` is not set.
pub const DEFAULT_RENDERER_CMD: &str = "integro-scene";

/// [`RenderPipeline`] backed by an external renderer process.
pub struct CommandPipeline {
    program: String,
}

impl CommandPipeline {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl RenderPipeline for CommandPipeline {
    async fn render(&self, script: &SceneScript, output: &Path) -> Result<(), RenderError> {
        let script_json =
            serde_json::to_string(script).expect("scene script serialization is infallible");

        tracing::debug!(program = %self.program, output = %output.display(), "Invoking renderer");

        let result = tokio::process::Command::new(&self.program)
            .arg("--script")
            .arg(&script_json)
            .arg("--output")
            .arg(output)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RenderError::NotFound(e)
                } else {
                    RenderError::Io(e)
                }
            })?;

        if !result.status.success() {
            return Err(RenderError::ExecutionFailed {
                exit_code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).to_string(),
            });
        }

        if !output.exists() {
            return Err(RenderError::MissingArtifact(
                output.to_string_lossy().to_string(),
            ));
        }

        Ok(())
    }
}
