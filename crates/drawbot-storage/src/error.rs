use drawbot_core::DrawingId;
use thiserror::Error;

/// Persistence errors.
///
/// Loads fail closed: a drawing that cannot be decoded is an error, never
/// a silently empty drawing.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Storage API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    #[error("Drawing {0} not found")]
    NotFound(DrawingId),

    /// A sequence arrived in a shape that is neither a plain array nor a
    /// known envelope.
    #[error("Unrecognized sequence envelope: {found}")]
    EnvelopeMismatch {
        /// Short description of what arrived instead.
        found: String,
    },

    /// A stored drawing is missing fields or has fields of the wrong type.
    #[error("Malformed drawing: {0}")]
    MalformedDrawing(String),

    /// The outgoing payload could not be encoded.
    #[error("Failed to encode drawing: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        StorageError::MalformedDrawing(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}
