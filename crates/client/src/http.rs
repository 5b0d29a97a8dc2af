//! HTTP transport against the render service.
//!
//! One client for all three client-side paths: status polling, preview
//! requests, and the result-view fetch.

use async_trait::async_trait;

use integro_core::protocol::{JobStatus, PreviewRequest, PreviewResponse, ResultView};
use integro_core::types::JobId;

use crate::preview::PreviewTransport;
use crate::status::StatusSource;
use crate::transport::TransportError;

/// HTTP client bound to one server base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch the result view for a job.
    pub async fn result_view(&self, job_id: JobId) -> Result<ResultView, TransportError> {
        let url = format!("{}/api/v1/jobs/{job_id}/result", self.base_url);
        let view = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(view)
    }

    /// Absolute URL for an artifact path returned in a result view.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch_status(&self, job_id: JobId) -> Result<JobStatus, TransportError> {
        let url = format!("{}/api/v1/jobs/{job_id}/status", self.base_url);
        let status = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status)
    }
}

#[async_trait]
impl PreviewTransport for ApiClient {
    async fn fetch_preview(
        &self,
        request: &PreviewRequest,
    ) -> Result<PreviewResponse, TransportError> {
        let url = format!("{}/api/v1/preview", self.base_url);
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }
}
