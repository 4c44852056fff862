//! Error handling for drawbot
//!
//! Provides the error types shared across the workspace:
//! - Command errors (malformed or unknown shape descriptors)
//! - A unified error type used by the public APIs
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Shape command error type
///
/// Raised when a raw descriptor cannot be turned into a valid shape command.
/// These are always recoverable: the offending command is dropped with a
/// diagnostic and the rest of the batch proceeds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Descriptor is not a JSON object
    #[error("Shape descriptor must be an object, got {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: String,
    },

    /// Descriptor has no `shape` tag
    #[error("Missing 'shape' in command")]
    MissingShape,

    /// Descriptor names a shape kind that is not supported
    #[error("Unknown shape: {shape}")]
    UnknownShape {
        /// The unrecognized shape tag.
        shape: String,
    },

    /// A required field is absent or null
    #[error("Invalid {kind} command: missing '{field}'")]
    MissingField {
        /// Shape kind being parsed.
        kind: String,
        /// Name of the missing field.
        field: String,
    },

    /// A field is present but has the wrong type
    #[error("Invalid {kind} command: field '{field}' {reason}")]
    InvalidField {
        /// Shape kind being parsed.
        kind: String,
        /// Name of the offending field.
        field: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// The command parsed but violates a shape invariant
    #[error("Invalid {kind} command: {reason}")]
    Invalid {
        /// Shape kind being validated.
        kind: String,
        /// The violated invariant.
        reason: String,
    },
}

impl CommandError {
    pub fn missing_field(kind: impl Into<String>, field: impl Into<String>) -> Self {
        CommandError::MissingField {
            kind: kind.into(),
            field: field.into(),
        }
    }

    pub fn invalid(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        CommandError::Invalid {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for drawbot
///
/// A unified error type for the core layers. Crates with transport concerns
/// (generator, storage) define their own error enums and convert at the edge.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a shape command error
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Command(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let err = CommandError::missing_field("circle", "radius");
        assert_eq!(err.to_string(), "Invalid circle command: missing 'radius'");

        let err = CommandError::UnknownShape {
            shape: "hexagon".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown shape: hexagon");

        let err = CommandError::invalid("rect", "width must be > 0");
        assert_eq!(err.to_string(), "Invalid rect command: width must be > 0");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = CommandError::MissingShape.into();
        assert!(err.is_command_error());
        assert_eq!(err.to_string(), "Missing 'shape' in command");

        let err = Error::other("boom");
        assert!(!err.is_command_error());
        assert_eq!(err.to_string(), "boom");
    }
}
