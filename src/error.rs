//! Error types for promptreg
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur while loading or using prompt templates
#[derive(Debug, Error)]
pub enum PromptError {
    /// Template source (file or directory) does not exist
    #[error("Template source not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Template content could not be read or is not valid UTF-8 text
    #[error("Failed to read template {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// Lookup of a name that is not registered
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Variable substitution failed
    #[error("Render error: {0}")]
    Render(String),

    /// File name filter is not a valid glob pattern
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Retrieved document lacks the fields needed to format it
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// IO error reading a document file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document file is not valid JSON or JSON Lines
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for promptreg operations
pub type Result<T> = std::result::Result<T, PromptError>;
