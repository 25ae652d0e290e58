//! Error types for menu search.

use std::path::PathBuf;
use thiserror::Error;

/// Structural errors in a menu tree - fatal at index build time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The tree (or the records it was linked from) is malformed.
    #[error("Invalid menu tree: {reason}")]
    InvalidTree { reason: String },
}

impl TreeError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        TreeError::InvalidTree {
            reason: reason.into(),
        }
    }
}

/// Action reference errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRefError {
    /// The reference has no `model,id` shape.
    #[error("Malformed action reference: {0:?}")]
    Malformed(String),

    /// The id part is not a number.
    #[error("Action reference {reference:?} has a non-numeric id")]
    InvalidId { reference: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error reading {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// Parse error.
    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Errors loading a menu tree from a host source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The payload could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// The payload is not a valid menu document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The payload parsed but does not form a valid tree.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}
