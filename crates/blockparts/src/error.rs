//! Error types for block registration and template execution.
//!
//! This module provides [`BlockError`], the error type for the fallible inner
//! layers: metadata loading, registry operations, and template execution.
//!
//! Note that these errors never cross the render boundary. A registered
//! block's `render` swallows them and degrades to the next resolution stage
//! (or to an empty string); only construction via
//! [`try_build`](crate::DynamicBlockBuilder::try_build) surfaces them.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for block metadata, registration, and template operations.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The `block.json` metadata file does not exist.
    #[error("block metadata not found at {path}")]
    MetadataNotFound {
        /// Path that was checked for the metadata file
        path: PathBuf,
    },

    /// The metadata file exists but could not be used (bad JSON, missing name).
    #[error("invalid block metadata at {path}: {message}")]
    MetadataInvalid {
        /// Path to the offending metadata file
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// A block with the same identity is already registered.
    #[error("block \"{name}\" is already registered")]
    AlreadyRegistered {
        /// The conflicting block identity
        name: String,
    },

    /// Template compilation or rendering failure.
    #[error("template error: {0}")]
    Template(String),

    /// I/O error (e.g., reading a template or metadata file from disk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<minijinja::Error> for BlockError {
    fn from(err: minijinja::Error) -> Self {
        BlockError::Template(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlockError::AlreadyRegistered {
            name: "acme/card".to_string(),
        };
        assert!(err.to_string().contains("acme/card"));
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BlockError = io_err.into();
        assert!(matches!(err, BlockError::Io(_)));
    }

    #[test]
    fn test_from_minijinja_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let err: BlockError = mj_err.into();
        assert!(matches!(err, BlockError::Template(_)));
    }
}
