//! Error handling module for rigforge
//!
//! Provides centralized error handling with proper error types using thiserror.
//! None of these errors is fatal to a session: the adapter layer in `app`
//! turns every one of them into a no-op plus an advisory notice.

use thiserror::Error;

use crate::types::Category;

/// Main error type for rigforge
#[derive(Error, Debug)]
pub enum ForgeError {
    /// IO errors (store, export files, opener process)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog data errors (unreadable source, duplicate ids)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A component id that does not resolve in the given category
    #[error("No {category} component with id '{id}'")]
    NotFound { category: Category, id: String },

    /// A preset name that is not defined
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    /// Imported or shared documents with an unexpected shape
    #[error("Invalid build file format: {0}")]
    Format(String),

    /// Snapshot load refused under the reject policy
    #[error("Snapshot rejected: {0}")]
    Snapshot(String),

    /// A quote channel could not deliver the message
    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}

/// Result type alias for rigforge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

impl ForgeError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a not-found error for a category/id pair
    pub fn not_found(category: Category, id: impl Into<String>) -> Self {
        Self::NotFound {
            category,
            id: id.into(),
        }
    }

    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a snapshot rejection error
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Create a dispatch error
    pub fn dispatch(msg: impl Into<String>) -> Self {
        Self::Dispatch(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ForgeError::not_found(Category::Gpu, "rtx-9999");
        assert_eq!(err.to_string(), "No gpu component with id 'rtx-9999'");

        let err = ForgeError::format("missing 'components'");
        assert_eq!(
            err.to_string(),
            "Invalid build file format: missing 'components'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ForgeError = io_err.into();
        assert!(matches!(err, ForgeError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ForgeError = json_err.into();
        assert!(matches!(err, ForgeError::Json(_)));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(ForgeError::catalog("dup"), ForgeError::Catalog(_)));
        assert!(matches!(ForgeError::snapshot("x"), ForgeError::Snapshot(_)));
        assert!(matches!(ForgeError::dispatch("x"), ForgeError::Dispatch(_)));
    }
}
