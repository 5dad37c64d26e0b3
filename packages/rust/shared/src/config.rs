//! Runtime session configuration.
//!
//! postmortems reads no config file and no environment variables: the
//! [`SessionConfig`] is built from CLI flags alone, and the output target is
//! resolved from it just before the store is written.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Runtime configuration for one interactive session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The JSON store file to load and update.
    pub store_path: PathBuf,
    /// Preview the merged store on stdout instead of writing it.
    pub debug: bool,
}

impl SessionConfig {
    pub fn new(store_path: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            store_path: store_path.into(),
            debug,
        }
    }
}

// ---------------------------------------------------------------------------
// Output mode
// ---------------------------------------------------------------------------

/// Why the store is printed instead of written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewReason {
    /// `--debug` was given.
    Debug,
    /// The target file exists but cannot be written.
    Protected,
}

/// Where the merged store goes at the end of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Truncate and write the target file.
    Write,
    /// Print the JSON document to stdout.
    Preview(PreviewReason),
}

impl OutputMode {
    /// Pick the output mode for `config`, checking the target file's
    /// writability when not in debug mode.
    pub fn resolve(config: &SessionConfig) -> Self {
        if config.debug {
            return Self::Preview(PreviewReason::Debug);
        }
        if is_protected(&config.store_path) {
            tracing::warn!(path = ?config.store_path, "store file is not writable, previewing instead");
            return Self::Preview(PreviewReason::Protected);
        }
        Self::Write
    }
}

/// True when `path` exists and opening it for writing is refused.
///
/// The probe opens in append mode without `create`, so it never touches
/// the file's contents or creates it.
fn is_protected(path: &Path) -> bool {
    match OpenOptions::new().append(true).open(path) {
        Ok(_) => false,
        Err(e) => e.kind() == ErrorKind::PermissionDenied,
    }
}
