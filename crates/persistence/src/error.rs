//! Error types for the repository layer.
//!
//! Every repository operation returns a [`StorageResult`]. Absence on a read is
//! expressed as `Ok(None)`; [`StorageError::NotFound`] is reserved for mutating
//! operations that target an entity that does not exist.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The error type for all repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The targeted entity does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// An entity with the same identifier is already stored.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists { entity_type: String, id: String },

    /// The entity was modified after it was read.
    #[error("version conflict on {entity_type}/{id}: expected {expected}, found {actual}")]
    VersionConflict {
        entity_type: String,
        id: String,
        expected: u64,
        actual: u64,
    },

    /// The query cannot be executed as given.
    #[error("invalid query: {message}")]
    InvalidQuery { message: String },
}

impl StorageError {
    /// Creates a `NotFound` error for the given entity type and id.
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        StorageError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Returns true if this error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Result type alias for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::not_found("Author", "42");
        assert_eq!(err.to_string(), "Author not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_version_conflict_display() {
        let err = StorageError::VersionConflict {
            entity_type: "Course".to_string(),
            id: "7".to_string(),
            expected: 1,
            actual: 2,
        };
        assert!(err.to_string().contains("expected 1, found 2"));
        assert!(!err.is_not_found());
    }
}
