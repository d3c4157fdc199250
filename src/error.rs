//! Error types for reply extraction

use thiserror::Error;

/// Errors that can occur while decoding a raw message into an [`EmailBody`]
///
/// [`EmailBody`]: crate::EmailBody
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to parse the MIME structure
    #[error("Failed to parse email structure: {0}")]
    Structure(String),
}

/// Errors raised while validating extractor configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A text reply pattern is not a valid regular expression
    #[error("Invalid text pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An HTML pattern names a predicate this crate does not provide
    #[error("Unknown HTML predicate: {0}")]
    UnknownPredicate(String),

    /// An HTML pattern has an empty tag name
    #[error("HTML pattern is missing a tag name")]
    EmptyTag,

    /// The line window is outside the accepted range
    #[error("Line window must be between 1 and {max}, got {value}")]
    InvalidLineWindow { value: usize, max: usize },

    /// The configuration document could not be deserialized
    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for message decoding
pub type Result<T> = std::result::Result<T, ParseError>;

/// Result type for configuration
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
