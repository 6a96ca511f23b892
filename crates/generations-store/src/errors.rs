//! Error handling for generations-store
//!
//! Wraps generations-core ExError with store-specific helpers

use std::path::Path;

use generations_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a file operation
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation)
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a YAML syntax or schema error
pub fn yaml_error(operation: &str, err: serde_yaml::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation)
        .with_message(format!("YAML error: {}", err))
}

/// Create a database validation error
pub fn database_validation(person_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("database_validate")
        .with_entity_id(person_id)
        .with_message(reason.to_string())
}

/// Create a render configuration validation error
pub fn config_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("config_validate")
        .with_message(reason.to_string())
}

/// Prefix the message of `err` with the file it came from
pub fn in_file(err: ExError, path: &Path) -> ExError {
    let message = format!("{}: {}", path.display(), err.message());
    err.with_message(message)
}
