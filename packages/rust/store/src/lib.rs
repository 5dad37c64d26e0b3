//! JSON store file access for postmortems.
//!
//! A store is a single file holding a JSON array of postmortem records.
//! This crate loads it, derives the session lookup indexes from it, and
//! writes the merged result back at the end of a session.
//!
//! **Access rules:**
//! - The file is read once at start via [`load_store`]
//! - It is written at most once, at the very end, via [`write_store`]

mod index;
mod loader;
mod writer;

pub use index::{SessionIndex, collect_keywords, collect_urls};
pub use loader::load_store;
pub use writer::{WriteOutcome, render_store, write_store};
