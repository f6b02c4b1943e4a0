//! The pipe engine: ordered post-type-check actions.
//!
//! A pipe is an ordered list of actions applied to a value after its schema's
//! type gate has passed. Each action may validate the value, transform it, or
//! reject it; actions run in declaration order and each sees the output of
//! its predecessor. A failing action never commits its transformation; later
//! actions continue from the last successful value.
//!
//! # Example
//!
//! ```rust
//! use assay::pipe::{actions, Pipe};
//! use assay::{ParseInfo, Reason};
//!
//! let pipe: Pipe<String> = Pipe::new()
//!     .with(actions::to_trimmed())
//!     .with(actions::min_length(2));
//!
//! let info = ParseInfo::new().validate_info(Reason::String);
//! let result = assay::pipe::run("  hi  ".to_string(), &pipe, &info);
//! assert!(result.is_success());
//! ```

pub mod actions;

use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::info::ValidateInfo;
use crate::{err, ok, Parsed};

/// One pipe step: validate, transform, or reject a value.
pub type Action<T> = Box<dyn Fn(&T, &ValidateInfo) -> Parsed<T> + Send + Sync>;

/// An ordered list of actions applied after a type gate.
pub struct Pipe<T> {
    actions: Vec<Action<T>>,
}

impl<T> Pipe<T> {
    /// Creates an empty pipe.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Appends an action and returns self for chaining.
    pub fn with(mut self, action: Action<T>) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends an action in place.
    pub fn push(&mut self, action: Action<T>) {
        self.actions.push(action);
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if the pipe has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<T> Default for Pipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a pipe over a type-checked value.
///
/// Actions run at most once each, in declaration order. On failure:
/// - with `abort_early` or `abort_pipe_early`, the failing result is
///   returned immediately and the remaining actions are skipped;
/// - otherwise the issues accumulate and the next action sees the last
///   successful value.
pub fn run<T>(value: T, pipe: &Pipe<T>, info: &ValidateInfo) -> Parsed<T> {
    if pipe.is_empty() {
        return ok(value);
    }

    let mut output = value;
    let mut issues: Vec<Issue> = Vec::new();

    for action in &pipe.actions {
        match action(&output, info) {
            Validation::Success(next) => output = next,
            Validation::Failure(failure) => {
                if info.abort_early || info.abort_pipe_early {
                    return err(failure);
                }
                issues.extend(failure);
            }
        }
    }

    if issues.is_empty() {
        ok(output)
    } else {
        err(Issues::from_vec(issues))
    }
}
