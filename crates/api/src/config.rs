use std::path::PathBuf;

use integro_render::command::DEFAULT_RENDERER_CMD;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Directory rendered videos are written to and served from.
    pub artifact_dir: PathBuf,
    /// Renderer binary invoked per job.
    pub renderer_cmd: String,
    /// Terminal job records older than this are evicted.
    pub job_retention_hours: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default           |
    /// |-------------------------|-------------------|
    /// | `HOST`                  | `0.0.0.0`         |
    /// | `PORT`                  | `3000`            |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`              |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`              |
    /// | `ARTIFACT_DIR`          | `storage/videos`  |
    /// | `RENDERER_CMD`          | `integro-scene`   |
    /// | `JOB_RETENTION_HOURS`   | `24`              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let artifact_dir: PathBuf = std::env::var("ARTIFACT_DIR")
            .unwrap_or_else(|_| "storage/videos".into())
            .into();

        let renderer_cmd =
            std::env::var("RENDERER_CMD").unwrap_or_else(|_| DEFAULT_RENDERER_CMD.into());

        let job_retention_hours: i64 = std::env::var("JOB_RETENTION_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("JOB_RETENTION_HOURS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            artifact_dir,
            renderer_cmd,
            job_retention_hours,
        }
    }
}
