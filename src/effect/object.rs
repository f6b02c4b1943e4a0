//! Async object schema.

use futures::future::{join_all, try_join_all, BoxFuture, FutureExt};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::path::PathItem;
use crate::pipe::actions;
use crate::{err, Parsed};

use super::pipe::{lift, run_async, AsyncPipe};
use super::traits::{AsyncSchema, AsyncValueSchema};

/// The async rendition of the object schema.
///
/// Entries parse concurrently; the output map is assembled in declaration
/// order regardless of completion order. Under abort-early the first
/// failing entry's result is surfaced and the remaining entries' results
/// are discarded.
pub struct AsyncObjectSchema {
    entries: IndexMap<String, Box<dyn AsyncValueSchema>>,
    pipe: AsyncPipe<Map<String, Value>>,
    type_error_message: Option<String>,
}

impl AsyncObjectSchema {
    /// Creates an async object schema with no declared entries.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            pipe: AsyncPipe::new(),
            type_error_message: None,
        }
    }

    /// Declares an entry with an async child schema.
    pub fn entry<S>(mut self, key: impl Into<String>, schema: S) -> Self
    where
        S: AsyncSchema + 'static,
    {
        self.entries.insert(key.into(), Box::new(schema));
        self
    }

    /// Appends a custom action to the object-level pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Map<String, Value>, &ValidateInfo) -> Parsed<Map<String, Value>>
            + Send
            + Sync
            + 'static,
    {
        self.pipe.push(lift(actions::custom(check)));
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the declared entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &dyn AsyncValueSchema)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s.as_ref()))
    }
}

impl Default for AsyncObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncSchema for AsyncObjectSchema {
    type Output = Map<String, Value>;

    fn kind(&self) -> &'static str {
        "object"
    }

    fn reason(&self) -> Reason {
        Reason::Object
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Map<String, Value>>> {
        async move {
            let obj = match input.as_object() {
                Some(o) => o,
                None => {
                    let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                    return err(Issues::single(info.type_issue("object", message, input)));
                }
            };

            let output = if info.abort_early() {
                // First failure wins at the join; sibling results are dropped.
                let tasks = self.entries.iter().map(|(key, schema)| {
                    let value = obj.get(key).cloned().unwrap_or(Value::Null);
                    let child_info = info.descend(PathItem::object_key(input, key, &value));
                    async move {
                        match schema.parse_value(&value, &child_info).await {
                            Validation::Success(parsed) => Ok(parsed),
                            Validation::Failure(failure) => Err(failure),
                        }
                    }
                });

                match try_join_all(tasks).await {
                    Ok(parsed) => {
                        let mut output = Map::new();
                        for (key, value) in self.entries.keys().zip(parsed) {
                            output.insert(key.clone(), value);
                        }
                        output
                    }
                    Err(failure) => return err(failure),
                }
            } else {
                let tasks = self.entries.iter().map(|(key, schema)| {
                    let value = obj.get(key).cloned().unwrap_or(Value::Null);
                    let child_info = info.descend(PathItem::object_key(input, key, &value));
                    async move { schema.parse_value(&value, &child_info).await }
                });

                let results = join_all(tasks).await;
                let mut issues: Vec<Issue> = Vec::new();
                let mut output = Map::new();
                for (key, result) in self.entries.keys().zip(results) {
                    match result {
                        Validation::Success(parsed) => {
                            output.insert(key.clone(), parsed);
                        }
                        Validation::Failure(failure) => issues.extend(failure),
                    }
                }

                if !issues.is_empty() {
                    return err(Issues::from_vec(issues));
                }
                output
            };

            run_async(output, &self.pipe, &info.validate_info(Reason::Object)).await
        }
        .boxed()
    }

    fn parse_to_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        async move { self.parse(input, info).await.map(Value::Object) }.boxed()
    }
}
