//! REST backend.
//!
//! Endpoints, relative to the base URL:
//! - `POST /api/drawingstorage` stores a drawing and answers with its id
//! - `GET /api/drawingstorage/{id}` fetches one drawing
//! - `GET /api/users/{owner}/drawings` lists an owner's drawings

use async_trait::async_trait;
use drawbot_core::{DrawingId, OwnerId};
use reqwest::StatusCode;
use serde_json::Value;

use crate::{DrawingBackend, StorageError};

/// HTTP client for a drawing storage service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// * `base_url` - Service root, e.g. `http://localhost:5203`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Returns the response unchanged on success, or an Api error with the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value, StorageError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl DrawingBackend for HttpBackend {
    async fn post_drawing(&self, payload: &Value) -> Result<Value, StorageError> {
        let response = self
            .client
            .post(format!("{}/api/drawingstorage", self.base_url))
            .json(payload)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn get_drawing(&self, id: DrawingId) -> Result<Option<Value>, StorageError> {
        let response = self
            .client
            .get(format!("{}/api/drawingstorage/{}", self.base_url, id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse_response(response).await.map(Some)
    }

    async fn get_owner_drawings(&self, owner: OwnerId) -> Result<Value, StorageError> {
        let response = self
            .client
            .get(format!("{}/api/users/{}/drawings", self.base_url, owner))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
