//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: everything around the parser that can actually fail.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("serialize notes: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
