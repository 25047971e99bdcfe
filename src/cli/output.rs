//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::QueueError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &QueueError) -> String {
    match e {
        QueueError::Validation(inner) => format!("Invalid input: {}", inner),
        QueueError::Storage(inner) => format!("Storage failure (nothing was changed): {}", inner),
        other => other.to_string(),
    }
}
