//! Error types for filter construction and configuration.

/// Errors raised while building or reconfiguring filters.
///
/// These surface at startup. Requests never produce them: an unknown locale
/// on generation simply yields an unprefixed URL.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A locale identifier cannot be used as a path segment.
    #[error("Invalid locale identifier: {0:?}")]
    InvalidLocale(String),

    /// Neither the configuration nor the catalog supplied any locale.
    #[error("No locales configured")]
    EmptyLocaleSet,

    /// A pagination segment cannot be used as a path segment.
    #[error("Invalid pagination segment: {0:?}")]
    InvalidSegment(String),

    /// The configuration names a filter that does not exist.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// A filter pattern failed to compile.
    #[error("Invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The configuration document could not be parsed.
    #[error("Invalid routing configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for filter construction.
pub type Result<T> = std::result::Result<T, FilterError>;
