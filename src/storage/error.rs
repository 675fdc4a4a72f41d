//! Key-value storage error types

use thiserror::Error;

/// Errors that can occur while reading or writing persisted client state
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored content could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing store is missing or refused the operation
    /// (no `window`, storage disabled, quota exceeded)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A lock guarding the in-memory map was poisoned
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Unavailable("localStorage disabled".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: localStorage disabled");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
