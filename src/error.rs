//! Error types for the brewery service
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Upstream Error Enum ==
/// Failure while reaching or decoding the third-party brewery source.
///
/// Payloads are plain strings so an error can be cloned and handed to every
/// caller that waited on the same refresh attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Connection, timeout or other transport failure
    #[error("Upstream request failed: {0}")]
    Network(String),

    /// Upstream answered with a non-success HTTP status
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Response body was not a valid brewery list
    #[error("Failed to decode upstream payload: {0}")]
    Decode(String),
}

// == Service Error Enum ==
/// Errors surfaced to the service facade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Refresh of the brewery dataset failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Request parameters were rejected before querying
    #[error("Invalid request: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// == Result Type Alias ==
/// Convenience Result type for the brewery service.
pub type Result<T> = std::result::Result<T, ServiceError>;
