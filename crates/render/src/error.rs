use integro_core::expr::ParseError;

/// Errors from scene-script construction or the render pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The integrand or a bound failed to parse at render time.
    #[error("expression error: {0}")]
    Expression(#[from] ParseError),

    /// The renderer binary could not be found or started.
    #[error("renderer binary not found: {0}")]
    NotFound(std::io::Error),

    /// The renderer ran and exited non-zero.
    #[error("renderer failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The renderer exited zero but produced no artifact file.
    #[error("renderer produced no artifact at {0}")]
    MissingArtifact(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
