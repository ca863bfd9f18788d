//! Error types for cryptobag
//!
//! Every failure coming back from the identity provider or the document store
//! is carried verbatim inside [`Error::Provider`] or [`Error::Store`], so the
//! caller can branch on the backend's own error code.

use std::fmt::{self, Display};
use thiserror::Error;

/// Error reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    /// Provider error code (e.g. "wrong-password")
    pub code: String,
    /// Human readable message
    pub message: String,
}

impl ProviderError {
    /// Create a new provider error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for ProviderError {}

/// Error reported by the document store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// Store error code (e.g. "unavailable")
    pub code: String,
    /// Human readable message
    pub message: String,
}

impl StoreError {
    /// Create a new store error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for StoreError {}

/// Cryptobag error type
#[derive(Debug, Error)]
pub enum Error {
    /// Identity provider failure
    #[error("Identity provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Document store failure
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    /// Malformed market feed payload
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider reported success but returned no identity
    #[error("Ambiguous failure: {0}")]
    AmbiguousFailure(String),

    /// An operation needed a signed-in user and there is none
    #[error("No active session")]
    NoActiveSession,

    /// The signed-in user has no profile document
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// The profile document is missing a field or has the wrong shape
    #[error("Malformed profile: {0}")]
    MalformedProfile(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::AmbiguousFailure(msg) => Error::AmbiguousFailure(format!("{}: {}", context, msg)),
                Error::ProfileNotFound(msg) => Error::ProfileNotFound(format!("{}: {}", context, msg)),
                Error::MalformedProfile(msg) => Error::MalformedProfile(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                // Backend and decode errors stay untouched
                Error::Provider(e) => Error::Provider(e),
                Error::Store(e) => Error::Store(e),
                Error::Decode(e) => Error::Decode(e),
                Error::NoActiveSession => Error::NoActiveSession,
            }
        })
    }
}
