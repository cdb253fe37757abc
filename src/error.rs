//! Error types for Flowdeck.
//!
//! All errors in Flowdeck are represented by the `FlowError` enum.
//! Graph edits and compilation never fail; only configuration loading and the
//! sync facade produce errors.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all Flowdeck operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// Caller errors against a workflow (missing id, unsaved workflow).
    #[error("{0}")]
    Workflow(String),

    /// The engine answered 401. Callers should ask for new credentials.
    #[error("authentication required: {0}")]
    Unauthorized(String),

    /// The engine answered with any other non-2xx status.
    #[error("remote error {status}: {body}")]
    Remote {
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect, DNS, body read).
    #[error("{0}")]
    Transport(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl FlowError {
    /// Whether this error asks the caller to re-authenticate.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, FlowError::Unauthorized(_))
    }

    /// Status code returned by the engine, if there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FlowError::Unauthorized(_) => Some(401),
            FlowError::Remote {
                status,
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

impl From<FlowError> for String {
    fn from(val: FlowError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for FlowError {
    fn from(error: std::io::Error) -> Self {
        FlowError::IoError(error.to_string())
    }
}

impl From<FlowError> for std::io::Error {
    fn from(val: FlowError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(error: serde_json::Error) -> Self {
        FlowError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for FlowError {
    fn from(error: toml::de::Error) -> Self {
        FlowError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for FlowError {
    fn from(error: reqwest::Error) -> Self {
        FlowError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_required_is_distinct() {
        let unauthorized = FlowError::Unauthorized("invalid api key".to_string());
        let remote = FlowError::Remote {
            status: 500,
            body: "boom".to_string(),
        };

        assert!(unauthorized.is_auth_required());
        assert!(!remote.is_auth_required());
        assert!(!FlowError::Transport("connection refused".to_string()).is_auth_required());
    }

    #[test]
    fn test_status() {
        assert_eq!(FlowError::Unauthorized(String::new()).status(), Some(401));
        assert_eq!(
            FlowError::Remote {
                status: 404,
                body: "not found".to_string()
            }
            .status(),
            Some(404)
        );
        assert_eq!(FlowError::Workflow("missing id".to_string()).status(), None);
    }

    #[test]
    fn test_display() {
        let err = FlowError::Remote {
            status: 422,
            body: "bad node".to_string(),
        };
        assert_eq!(err.to_string(), "remote error 422: bad node");
        assert_eq!(FlowError::Unauthorized("expired".to_string()).to_string(), "authentication required: expired");
    }
}
