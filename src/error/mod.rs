//! Issue types for validation failures.
//!
//! This module provides the issue record emitted for every failed check,
//! the non-empty issue collection carried by failing parses, and the domain
//! error raised by the one-shot parsing surface.

mod issue;
mod parse_error;

pub use issue::{Issue, Issues, Origin, Reason};
pub use parse_error::ParseError;
