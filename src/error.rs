//! Error types for request interception.
//!
//! Every variant is terminal for the request being rewritten: the surrounding
//! proxy must answer the client with an error instead of forwarding a body
//! that may have been half-mutated. Non-fatal conditions (network opt-out,
//! over-long hostname, unreachable agent) never show up here.

use crate::daemon::DaemonError;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for interception operations.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// A field exists but holds a value of an incompatible shape.
    #[error("Wrong type for field {field}: expected {expected}, got {actual}")]
    WrongType {
        field: String,
        expected: &'static str,
        actual: String,
    },

    /// A field needed to proceed is absent.
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    /// Image inspection reported not-found. The name is part of the message
    /// because clients match on it.
    #[error("No such image: {name}")]
    NoSuchImage { name: String },

    /// Neither an entrypoint nor a command could be resolved.
    #[error("No command specified")]
    NoCommandSpecified,

    /// The request body is not a JSON object.
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The rewritten body could not be encoded.
    #[error("Failed to encode rewritten body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Daemon(#[from] DaemonError),
}

impl ProxyError {
    pub fn wrong_type(field: impl Into<String>, expected: &'static str, actual: &Value) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            actual: actual.to_string(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// HTTP status the surrounding proxy should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::WrongType { .. }
            | ProxyError::MissingRequiredField { .. }
            | ProxyError::MalformedBody(_) => 400,
            ProxyError::NoSuchImage { .. } => 404,
            ProxyError::NoCommandSpecified | ProxyError::Encode(_) | ProxyError::Daemon(_) => {
                500
            }
        }
    }
}
