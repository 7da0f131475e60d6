//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the case law assistant, providing the error
//! types shared by all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from configuration, the HTTP layer, and the
//!   generative-text collaborator
//! - **Output**: Structured error types with context
//! - **Error Categories**: Configuration, Generative, Generic
//!
//! ## Key Features
//! - Single error enum with detailed context per variant
//! - Automatic conversion from common library errors
//! - Error categories for structured logging
//!
//! Note that the extraction core (`summary`, `report`) never surfaces these
//! errors: a failing generative call is absorbed at the call site and replaced
//! by deterministic fallback content. Errors here belong to the surrounding
//! plumbing (config loading and validation, server startup).

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, AssistError>;

/// Error types for the case law assistant
#[derive(Debug, Error)]
pub enum AssistError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Generative-text service not configured
    #[error("Generative service unavailable: {reason}")]
    GenerativeUnavailable { reason: String },

    /// Generative-text call failures (network, service, malformed response)
    #[error("Generative call failed: {details}")]
    GenerativeCallFailed { details: String },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AssistError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            AssistError::Config { .. }
            | AssistError::Toml(_)
            | AssistError::ValidationFailed { .. } => "configuration",
            AssistError::GenerativeUnavailable { .. }
            | AssistError::GenerativeCallFailed { .. }
            | AssistError::Http(_) => "generative",
            AssistError::Internal { .. } | AssistError::Json(_) => "generic",
        }
    }
}

impl From<std::io::Error> for AssistError {
    fn from(err: std::io::Error) -> Self {
        AssistError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}
