//! Shared types, error model, and session configuration for postmortems.
//!
//! This crate is the foundation depended on by all other postmortems crates.
//! It provides:
//! - [`PostmortemError`]: the unified error type
//! - Domain types ([`Record`], [`StoredRecord`], [`Store`])
//! - Configuration ([`SessionConfig`], [`OutputMode`])

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{OutputMode, PreviewReason, SessionConfig};
pub use error::{PostmortemError, Result};
pub use types::{Record, Store, StoredRecord};
