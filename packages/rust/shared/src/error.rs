//! Error types for postmortems.
//!
//! Library crates use [`PostmortemError`] via `thiserror`.
//! The cli app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all postmortems operations.
#[derive(Debug, thiserror::Error)]
pub enum PostmortemError {
    /// Reading the store file failed after it was opened.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The store file holds malformed JSON or a record of the wrong shape.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Standard input ran out before the session finished.
    #[error("Aborted")]
    Aborted,

    /// The target file could not be opened or written.
    #[error("cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading a prompt answer or writing to the console failed.
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),

    /// Store serialization failed.
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PostmortemError>;

impl PostmortemError {
    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with the path being read.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a `std::io::Error` with the path being written.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PostmortemError::parse("expected value at line 1 column 1");
        assert_eq!(err.to_string(), "parse error: expected value at line 1 column 1");

        assert_eq!(PostmortemError::Aborted.to_string(), "Aborted");

        let err = PostmortemError::write(
            "/nope/out.json",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(err.to_string().contains("/nope/out.json"));
    }
}
