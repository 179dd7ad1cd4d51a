//! Custom error types for Memoroa
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Memoroa operations
#[derive(Error, Debug)]
pub enum MemoroaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The user backed out of a prompt or picker; not a real failure
    #[error("Operation cancelled by user")]
    UserCancelled,

    /// The file does not carry the expected magic bytes ("not our file")
    #[error("Not a Memoroa backup file")]
    BadFormat,

    /// The file is too short to hold magic, salt, nonce, and tag
    #[error("Backup file is truncated or malformed")]
    MalformedEnvelope,

    /// Tag verification failed: wrong passphrase or corrupted/tampered bytes.
    /// AEAD cannot tell these apart, and must not.
    #[error("Wrong passphrase, or the backup file is corrupted")]
    AuthenticationFailed,

    /// Decryption succeeded but the plaintext is not the expected JSON
    #[error("Backup payload is not valid: {0}")]
    InvalidPayload(String),
}

impl MemoroaError {
    /// Create a "not found" error for notes
    pub fn note_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Note",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a user cancellation (callers abort silently)
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for MemoroaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MemoroaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Memoroa operations
pub type MemoroaResult<T> = Result<T, MemoroaError>;
