//! Error types for RepoCard Studio.
//!
//! Library crates use [`RepoCardError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all RepoCard operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoCardError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// User-correctable input error (empty identifier, bad color, empty path...).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// The metadata source has no such repository.
    #[error("repository not found: {0}")]
    NotFound(String),

    /// The metadata source refused the request because of rate limiting.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other network/HTTP failure talking to the metadata source.
    #[error("network error: {0}")]
    Network(String),

    /// Response or snapshot decoding error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// External raster conversion failed.
    #[error("raster conversion failed: {0}")]
    Raster(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RepoCardError>;

impl RepoCardError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a user-correctable input problem rather than a
    /// system failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = RepoCardError::config("missing token");
        assert_eq!(err.to_string(), "config error: missing token");

        let err = RepoCardError::validation("output directory is empty");
        assert!(err.to_string().contains("output directory is empty"));
        assert!(err.is_validation());
    }

    #[test]
    fn io_error_carries_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RepoCardError::io("/tmp/share-kit", source);
        let msg = err.to_string();
        assert!(msg.contains("/tmp/share-kit"));
        assert!(msg.contains("denied"));
        assert!(!err.is_validation());
    }
}
