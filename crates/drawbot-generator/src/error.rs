use std::time::Duration;

use thiserror::Error;

/// Errors from the shape-generating service.
///
/// A failed generation never touches the drawing; the caller reports the
/// error and the session stays as it was.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generator API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// No answer within the configured deadline.
    #[error("Generator did not answer within {0:?}")]
    Timeout(Duration),

    /// The answer was not a JSON array of shape descriptors.
    #[error("Invalid generator payload: {0}")]
    InvalidPayload(String),

    /// The request could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl GeneratorError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        GeneratorError::InvalidPayload(msg.into())
    }

    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GeneratorError::Request(_) | GeneratorError::Timeout(_) => true,
            GeneratorError::Api { status, .. } => *status >= 500,
            GeneratorError::InvalidPayload(_) | GeneratorError::Encode(_) => false,
        }
    }
}
