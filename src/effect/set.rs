//! Async set schema.

use std::collections::HashSet;

use futures::future::{join_all, try_join_all, BoxFuture, FutureExt};
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::ParseInfo;
use crate::path::PathItem;
use crate::{err, ok, Parsed};

use super::traits::{AsyncSchema, AsyncValueSchema};

/// The async rendition of the set schema.
///
/// Values parse concurrently; the deduplicated output preserves iteration
/// order, first occurrence wins.
pub struct AsyncSetSchema {
    value: Box<dyn AsyncValueSchema>,
    type_error_message: Option<String>,
}

impl AsyncSetSchema {
    /// Creates an async set schema from a value schema.
    pub fn new<S: AsyncSchema + 'static>(value: S) -> Self {
        Self {
            value: Box::new(value),
            type_error_message: None,
        }
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

fn dedupe(parsed: Vec<Value>) -> Vec<Value> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut output = Vec::with_capacity(parsed.len());
    for value in parsed {
        let fingerprint =
            serde_json::to_string(&value).unwrap_or_else(|_| format!("{:?}", value));
        if seen.insert(fingerprint) {
            output.push(value);
        }
    }
    output
}

impl AsyncSchema for AsyncSetSchema {
    type Output = Vec<Value>;

    fn kind(&self) -> &'static str {
        "set"
    }

    fn reason(&self) -> Reason {
        Reason::Set
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Vec<Value>>> {
        async move {
            let arr = match input.as_array() {
                Some(a) => a,
                None => {
                    let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                    return err(Issues::single(info.type_issue("set", message, input)));
                }
            };

            let tasks = arr.iter().enumerate().map(|(index, item)| {
                let child_info = info.descend(PathItem::set_index(input, index, item));
                async move { self.value.parse_value(item, &child_info).await }
            });

            if info.abort_early() {
                let tasks = tasks.map(|task| async move {
                    match task.await {
                        Validation::Success(parsed) => Ok(parsed),
                        Validation::Failure(failure) => Err(failure),
                    }
                });
                match try_join_all(tasks).await {
                    Ok(parsed) => ok(dedupe(parsed)),
                    Err(failure) => err(failure),
                }
            } else {
                let results = join_all(tasks).await;
                let mut issues: Vec<Issue> = Vec::new();
                let mut parsed = Vec::with_capacity(results.len());
                for result in results {
                    match result {
                        Validation::Success(value) => parsed.push(value),
                        Validation::Failure(failure) => issues.extend(failure),
                    }
                }

                if issues.is_empty() {
                    ok(dedupe(parsed))
                } else {
                    err(Issues::from_vec(issues))
                }
            }
        }
        .boxed()
    }

    fn parse_to_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        async move { self.parse(input, info).await.map(Value::Array) }.boxed()
    }
}
