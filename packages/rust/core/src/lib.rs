//! Record validation and the interactive collection loop for postmortems.
//!
//! This crate turns console answers into validated [`Record`]s: field
//! checks live in [`validate`], the prompt loop in [`collector`].
//!
//! [`Record`]: postmortems_shared::Record

pub mod collector;
pub mod validate;

pub use collector::{Collector, Prompted};
pub use validate::{Rejection, UrlEntry, Validation, extract_domain, match_date};
