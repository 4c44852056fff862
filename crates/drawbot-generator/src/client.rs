//! HTTP client for the shape-generating service.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::sanitize::parse_batch;
use crate::{GenerationRequest, GeneratorError, ShapeGenerator};

/// Generator reached over HTTP.
///
/// The request is posted as JSON to a single endpoint, which answers with
/// a JSON array of raw shape descriptors.
#[derive(Debug, Clone)]
pub struct HttpShapeGenerator {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpShapeGenerator {
    /// * `endpoint` - Full URL, e.g. `http://localhost:5203/api/drawing`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &GenerationRequest) -> Result<Vec<Value>, GeneratorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!("Generator answered with {} bytes", body.len());
        parse_batch(&body)
    }
}

#[async_trait]
impl ShapeGenerator for HttpShapeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Value>, GeneratorError> {
        debug!(
            "Requesting shapes for '{}' ({} existing shapes)",
            request.new_instruction,
            request.existing_drawing.len()
        );

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.post(request))
                .await
                .map_err(|_| GeneratorError::Timeout(limit))?,
            None => self.post(request).await,
        };

        if let Err(e) = &result {
            warn!("Shape generation failed: {}", e);
        }
        result
    }
}
