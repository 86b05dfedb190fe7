//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Backend responded {status}: {message}")]
    BackendStatus { status: u16, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
