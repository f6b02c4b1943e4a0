//! The domain error raised by the one-shot parsing surface.

use thiserror::Error;

use super::Issues;

/// Error returned by [`parse`](crate::parse) when validation fails.
///
/// Wraps the full issue collection; the display string summarises the first
/// issue and the total count. Use [`issues`](ParseError::issues) to inspect
/// every failure.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .issues.summary())]
pub struct ParseError {
    issues: Issues,
}

impl ParseError {
    /// Creates a parse error from an issue collection.
    pub fn new(issues: Issues) -> Self {
        Self { issues }
    }

    /// Returns the issues that caused this error.
    pub fn issues(&self) -> &Issues {
        &self.issues
    }

    /// Consumes the error, returning the issues.
    pub fn into_issues(self) -> Issues {
        self.issues
    }
}
