//! Error types for tree construction and queries.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or traversing a tree.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A query or traversal was attempted before a successful `init`.
    #[error("walker has not been initialized")]
    Uninitialized,

    /// Permission denied for a path.
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// An entry is neither a file nor a directory.
    #[error("entry is neither a file nor a directory: {path}")]
    UnsupportedEntry { path: PathBuf },

    /// Malformed glob or regex pattern.
    #[error("invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// A loader rejected a file.
    #[error("loader failed for {path}: {source}")]
    Loader {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl WalkError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a loader error with path context.
    pub fn loader(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Loader {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create a pattern error.
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an error from an arbitrary message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
