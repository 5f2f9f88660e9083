//! Error types for practiq
//!
//! This module defines the error hierarchy for the whole engine.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for practiq
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Generic configuration failure
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A caller-supplied option failed validation
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    /// JSON (de)serialization failure
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Credential Errors
    // ============================================================================
    /// Credentials were missing or unusable
    #[error("Credential error: {message}")]
    Credentials { message: String },

    /// The credential endpoint was not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// Connectivity failure (DNS, refused, TLS, timeout); terminal
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status with a bounded body excerpt
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Transient failures outlasted the configured retries
    #[error("Operation '{operation}' failed after {attempts} attempts: {message}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        message: String,
    },

    // ============================================================================
    // Application Errors
    // ============================================================================
    /// The server accepted the request but rejected the operation.
    /// Carries the server-provided messages verbatim; never retried.
    #[error("GraphQL operation '{operation}' rejected: {}", .messages.join("; "))]
    Graphql {
        operation: String,
        messages: Vec<String>,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Catch-all with a preformatted message
    #[error("{0}")]
    Other(String),

    /// Wrapped error from a host-side collaborator
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a credential error
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a retries-exhausted error
    pub fn retries_exhausted(
        operation: impl Into<String>,
        attempts: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::RetriesExhausted {
            operation: operation.into(),
            attempts,
            message: message.into(),
        }
    }

    /// Create a GraphQL application error
    pub fn graphql(operation: impl Into<String>, messages: Vec<String>) -> Self {
        Self::Graphql {
            operation: operation.into(),
            messages,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only server-error-class transport failures are transient; client
    /// errors, connectivity failures, and application-level rejections
    /// are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable (server-error class)
pub(crate) fn is_retryable_status(status: u16) -> bool {
    (500..=599).contains(&status)
}

/// Result type alias for practiq
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
