//! Issue records and the accumulating issue collection.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::IssuePath;

/// The family of schema an issue came from.
///
/// Type-gate failures always carry [`Reason::Type`]; pipe actions carry the
/// family of the surrounding schema so a generic action can tell what kind
/// of value it is operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Type,
    String,
    Number,
    Bigint,
    Boolean,
    Date,
    Array,
    Tuple,
    Object,
    Record,
    Map,
    Set,
    Blob,
    Any,
}

impl Reason {
    /// Returns the stable tag for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Type => "type",
            Reason::String => "string",
            Reason::Number => "number",
            Reason::Bigint => "bigint",
            Reason::Boolean => "boolean",
            Reason::Date => "date",
            Reason::Array => "array",
            Reason::Tuple => "tuple",
            Reason::Object => "object",
            Reason::Record => "record",
            Reason::Map => "map",
            Reason::Set => "set",
            Reason::Blob => "blob",
            Reason::Any => "any",
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a keyed container produced an issue.
///
/// Set by map and record schemas when descending into a key schema or a
/// value schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Key,
    Value,
}

impl Origin {
    /// Returns the stable tag for this origin.
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Key => "key",
            Origin::Value => "value",
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure with full context.
///
/// `Issue` captures everything relevant about one failed check:
/// - **reason**: the abstract cause family (see [`Reason`])
/// - **validation**: a short machine-readable tag (e.g. `min_length`)
/// - **message**: human-readable description, overridable per validator
/// - **input**: the value that failed
/// - **path**: where in the input the failure occurred, root-first
/// - **issues**: nested issues (union alternatives)
/// - **origin**: key/value side for map and record failures
///
/// # Example
///
/// ```rust
/// use assay::{Issue, IssuePath, Reason};
/// use serde_json::json;
///
/// let issue = Issue::new(
///     Reason::String,
///     "min_length",
///     "length must be at least 2, got 1",
///     json!("a"),
///     IssuePath::root(),
/// );
///
/// assert_eq!(issue.validation, "min_length");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// The abstract cause family.
    pub reason: Reason,
    /// Machine-readable tag of the failed check.
    pub validation: String,
    /// Human-readable error message.
    pub message: String,
    /// The value that failed.
    pub input: Value,
    /// The path from the root input to the failing value.
    pub path: IssuePath,
    /// Sub-issues carried by union exhaustion for diagnostics.
    pub issues: Option<Vec<Issue>>,
    /// Key/value side for map and record failures.
    pub origin: Option<Origin>,
}

impl Issue {
    /// Creates a new issue with no nested issues and no origin.
    pub fn new(
        reason: Reason,
        validation: impl Into<String>,
        message: impl Into<String>,
        input: Value,
        path: IssuePath,
    ) -> Self {
        Self {
            reason,
            validation: validation.into(),
            message: message.into(),
            input,
            path,
            issues: None,
            origin: None,
        }
    }

    /// Attaches nested sub-issues and returns self for chaining.
    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = Some(issues);
        self
    }

    /// Attaches a key/value origin and returns self for chaining.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Replaces the message and returns self for chaining.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;
        if let Some(origin) = self.origin {
            write!(f, " ({})", origin)?;
        }
        write!(f, " [{}]", self.validation)
    }
}

impl std::error::Error for Issue {}

// All fields are owned; keep the assertions so a later field change cannot
// silently lose Send + Sync.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty collection of issues.
///
/// `Issues` wraps a `NonEmptyVec<Issue>` so a failing parse always carries
/// at least one issue. It implements `Semigroup`, letting sibling failures
/// combine during accumulation:
///
/// ```rust
/// use assay::{Issue, Issues, IssuePath, Reason};
/// use serde_json::json;
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::new(
///     Reason::Type, "string", "Invalid type", json!(1), IssuePath::root(),
/// ));
/// let b = Issues::single(Issue::new(
///     Reason::Type, "number", "Invalid type", json!("x"), IssuePath::root(),
/// ));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// Creates an `Issues` containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Creates an `Issues` from a `NonEmptyVec`.
    pub fn from_non_empty(issues: NonEmptyVec<Issue>) -> Self {
        Self(issues)
    }

    /// Creates an `Issues` from a `Vec<Issue>`.
    ///
    /// # Panics
    ///
    /// Panics if the vec is empty. Use this only where at least one issue
    /// was just collected.
    pub fn from_vec(issues: Vec<Issue>) -> Self {
        Self(NonEmptyVec::from_vec(issues).expect("Issues requires at least one issue"))
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false; the collection is non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns the first issue.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Returns all issues with the given validation tag.
    pub fn with_validation(&self, validation: &str) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.validation == validation).collect()
    }

    /// Returns all issues at the given path.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }

    /// One-line summary: the first issue plus the remaining count.
    pub fn summary(&self) -> String {
        let first = self.first().to_string();
        match self.len() {
            1 => first,
            n => format!("{} (and {} more issues)", first, n - 1),
        }
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parse failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
