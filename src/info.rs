//! Parse-time configuration threaded through nested parse calls.
//!
//! [`ParseInfo`] carries the caller's abort flags plus the internal descent
//! state (current path, map/record origin). It is threaded by value: every
//! descent into a child produces a fresh info, so no parse call can mutate
//! an ancestor's state. [`ValidateInfo`] is the owned view handed to pipe
//! actions and leaf validators.

use serde_json::Value;

use crate::error::{Issue, Origin, Reason};
use crate::path::{IssuePath, PathItem};

/// Configuration and descent state for one parse call.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::string();
/// let info = ParseInfo::new().with_abort_early(true);
/// let result = schema.parse(&json!(42), &info);
/// assert!(result.is_failure());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseInfo {
    abort_early: bool,
    abort_pipe_early: bool,
    path: IssuePath,
    origin: Option<Origin>,
}

impl ParseInfo {
    /// Creates a default info: accumulate everything, root path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return on the first issue anywhere in the tree.
    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    /// Return from each pipe on its first failing action.
    pub fn with_abort_pipe_early(mut self, abort_pipe_early: bool) -> Self {
        self.abort_pipe_early = abort_pipe_early;
        self
    }

    /// Returns true when the first issue anywhere ends the parse.
    pub fn abort_early(&self) -> bool {
        self.abort_early
    }

    /// Returns true when the first failing pipe action ends its pipe.
    pub fn abort_pipe_early(&self) -> bool {
        self.abort_pipe_early
    }

    /// Returns the accumulated path to the current node.
    pub fn path(&self) -> &IssuePath {
        &self.path
    }

    /// Returns the key/value origin, when inside a map or record side.
    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    /// Returns a fresh info for a child parse, with one more path item.
    ///
    /// The origin is inherited; map and record override it per side via
    /// [`descend_with_origin`](Self::descend_with_origin).
    pub fn descend(&self, item: PathItem) -> Self {
        Self {
            abort_early: self.abort_early,
            abort_pipe_early: self.abort_pipe_early,
            path: self.path.push(item),
            origin: self.origin,
        }
    }

    /// Returns a fresh info for a keyed-container side.
    pub fn descend_with_origin(&self, item: PathItem, origin: Origin) -> Self {
        Self {
            abort_early: self.abort_early,
            abort_pipe_early: self.abort_pipe_early,
            path: self.path.push(item),
            origin: Some(origin),
        }
    }

    /// Builds a type-gate issue at the current node.
    ///
    /// Every type-gate failure goes through here: `reason` is always the
    /// abstract `type` family, `validation` is the schema kind, the path
    /// and origin come from this info.
    pub fn type_issue(&self, validation: &str, message: &str, input: &Value) -> Issue {
        self.issue(Reason::Type, validation, message, input)
    }

    /// Builds an issue at the current node with an explicit reason.
    pub fn issue(&self, reason: Reason, validation: &str, message: &str, input: &Value) -> Issue {
        let issue = Issue::new(reason, validation, message, input.clone(), self.path.clone());
        match self.origin {
            Some(origin) => issue.with_origin(origin),
            None => issue,
        }
    }

    /// Returns the view handed to the pipe of a schema with the given
    /// reason family.
    pub fn validate_info(&self, reason: Reason) -> ValidateInfo {
        ValidateInfo {
            reason,
            path: self.path.clone(),
            abort_early: self.abort_early,
            abort_pipe_early: self.abort_pipe_early,
            origin: self.origin,
        }
    }
}

/// The view passed to pipe actions and leaf validators.
#[derive(Debug, Clone)]
pub struct ValidateInfo {
    /// The family of the surrounding schema.
    pub reason: Reason,
    /// The path to the value being validated.
    pub path: IssuePath,
    /// Whether the first issue anywhere ends the parse.
    pub abort_early: bool,
    /// Whether the first failing action ends this pipe.
    pub abort_pipe_early: bool,
    /// Key/value side, when inside a map or record.
    pub origin: Option<Origin>,
}

impl ValidateInfo {
    /// Builds an issue for a failed action.
    ///
    /// The reason, path, and origin come from this info; the action
    /// supplies its validation tag, message, and the failing value.
    pub fn issue(&self, validation: &str, message: impl Into<String>, input: &Value) -> Issue {
        let issue = Issue::new(
            self.reason,
            validation,
            message,
            input.clone(),
            self.path.clone(),
        );
        match self.origin {
            Some(origin) => issue.with_origin(origin),
            None => issue,
        }
    }
}
