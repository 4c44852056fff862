//! # Drawbot Generator
//!
//! Client side of the generative service that turns a natural-language
//! instruction into a batch of raw shape descriptors.
//!
//! The service is reached through the [`ShapeGenerator`] trait. The answer
//! is returned unvalidated; callers canonicalize it with
//! `drawbot_designer::canonicalize_batch`.

mod client;
mod error;
mod request;
pub mod sanitize;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

pub use client::HttpShapeGenerator;
pub use error::GeneratorError;
pub use request::GenerationRequest;
pub use sanitize::{parse_batch, sanitize_payload};

/// Source of raw shape descriptors for an instruction.
#[async_trait]
pub trait ShapeGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Value>, GeneratorError>;
}

/// Runs `generator` with a deadline, whatever its own timeout handling.
pub async fn generate_with_timeout<G: ShapeGenerator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
    limit: Duration,
) -> Result<Vec<Value>, GeneratorError> {
    tokio::time::timeout(limit, generator.generate(request))
        .await
        .map_err(|_| GeneratorError::Timeout(limit))?
}
