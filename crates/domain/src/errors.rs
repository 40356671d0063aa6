//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Unilink
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum UnilinkError {
    /// Local pre-flight validation failure. Carries the names of every
    /// missing or invalid field so screens can highlight them all at once.
    #[error("Invalid fields: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    /// Provider or store failure, already translated to a user-facing message.
    #[error("{0}")]
    Remote(String),

    /// Profile record absent for a known identity.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UnilinkError {
    /// Build a validation error from field names.
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation { fields: fields.into_iter().map(Into::into).collect() }
    }
}

/// Result type alias for Unilink operations
pub type Result<T> = std::result::Result<T, UnilinkError>;
