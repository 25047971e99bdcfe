//! Error types for the triage queue.

use crate::patient::PatientId;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Codec(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Input validation errors raised before a patient is constructed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name can only contain letters and spaces: {0:?}")]
    InvalidName(String),

    #[error("Age must be between 0 and 130, got {0}")]
    AgeOutOfRange(i64),

    #[error("Invalid priority level: {0:?} (expected 1-4 or LOW, MEDIUM, HIGH, EXTREME)")]
    InvalidPriority(String),

    #[error("Invalid patient id: {0:?}")]
    InvalidId(String),
}

/// Errors surfaced by the queue service
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Patient already exists: {0}")]
    Conflict(PatientId),

    #[error("Patient not found: {0}")]
    NotFound(PatientId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl From<config::ConfigError> for QueueError {
    fn from(err: config::ConfigError) -> Self {
        QueueError::Config(err.to_string())
    }
}
