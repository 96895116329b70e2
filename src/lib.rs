//! Wordcup tournament engine library.
//!
//! Exposes the roster, bracket, turn sequencer, progression, and report
//! modules for use by integration tests and the binary entry point.

pub mod bracket;
pub mod progression;
pub mod report;
pub mod roster;
pub mod sequencer;
