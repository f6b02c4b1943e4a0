//! The async pipe engine.
//!
//! Identical control flow to the sync engine, but actions return latent
//! results and are awaited strictly in declaration order, so a transforming
//! action's output reaches its successor.

use futures::future::{self, BoxFuture, FutureExt};
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::info::ValidateInfo;
use crate::pipe::Action;
use crate::{err, ok, Parsed};

/// One async pipe step.
pub type AsyncAction<T> =
    Box<dyn for<'a> Fn(&'a T, &'a ValidateInfo) -> BoxFuture<'a, Parsed<T>> + Send + Sync>;

/// Lifts a sync action into the async pipe.
pub fn lift<T: 'static + Send>(action: Action<T>) -> AsyncAction<T> {
    Box::new(move |value, info| future::ready(action(value, info)).boxed())
}

/// An ordered list of async actions applied after a type gate.
pub struct AsyncPipe<T> {
    actions: Vec<AsyncAction<T>>,
}

impl<T> AsyncPipe<T> {
    /// Creates an empty pipe.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Appends an async action and returns self for chaining.
    pub fn with(mut self, action: AsyncAction<T>) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends an async action in place.
    pub fn push(&mut self, action: AsyncAction<T>) {
        self.actions.push(action);
    }

    /// Returns true if the pipe has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<T> Default for AsyncPipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs an async pipe over a type-checked value.
///
/// Abort semantics match the sync engine: under either abort flag the
/// first failing action's result is returned immediately; otherwise issues
/// accumulate and later actions see the last successful value.
pub async fn run_async<T>(value: T, pipe: &AsyncPipe<T>, info: &ValidateInfo) -> Parsed<T> {
    if pipe.is_empty() {
        return ok(value);
    }

    let mut output = value;
    let mut issues: Vec<Issue> = Vec::new();

    for action in &pipe.actions {
        match action(&output, info).await {
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
