//! Bracket structure and construction.
//!
//! Contains the match records, the deferred winner-reference slots, and
//! the builder that lays out a single-elimination bracket as a flat
//! round-ordered match list.

pub mod build;
pub mod slot;

pub use build::{build_bracket, round_count};
pub use slot::{Match, Slot};
