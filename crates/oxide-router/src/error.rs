//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route matched the path.
    #[error("no route matched: {path}")]
    NotFound { path: String },

    /// Invalid path pattern.
    #[error("invalid path pattern: {0}")]
    InvalidPattern(String),

    /// Route name not found.
    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// A named route could not be generated because a parameter was missing.
    #[error("missing parameter '{param}' for route {route}")]
    MissingParameter { route: String, param: String },

    /// A filter failed while wrapping recognition or generation.
    #[error("filter '{filter}' failed: {message}")]
    Filter { filter: String, message: String },
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
