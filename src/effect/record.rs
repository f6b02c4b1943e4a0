//! Async record schema.

use futures::future::{join_all, try_join_all, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, Issues, Origin, Reason};
use crate::info::ParseInfo;
use crate::path::PathItem;
use crate::{err, ok, Parsed};

use super::traits::{AsyncSchema, AsyncValueSchema};

const DENYLIST: [&str; 3] = ["__proto__", "prototype", "constructor"];

/// The async rendition of the record schema.
///
/// Entries run concurrently; within one entry the key side parses before
/// the value side, and under accumulation both sides always surface.
pub struct AsyncRecordSchema {
    key: Box<dyn AsyncValueSchema>,
    value: Box<dyn AsyncValueSchema>,
    type_error_message: Option<String>,
}

impl AsyncRecordSchema {
    /// Creates an async record schema from key and value schemas.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: AsyncSchema + 'static,
        V: AsyncSchema + 'static,
    {
        Self {
            key: Box::new(key),
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

/// Outcome of one record entry under accumulation.
enum EntryOutcome {
    Parsed(String, Value),
    Failed(Vec<Issue>),
}

impl AsyncSchema for AsyncRecordSchema {
    type Output = Map<String, Value>;

    fn kind(&self) -> &'static str {
        "record"
    }

    fn reason(&self) -> Reason {
        Reason::Record
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
                    return err(Issues::single(info.type_issue("record", message, input)));
                }
            };

            let entries = obj
                .iter()
                .filter(|(key, _)| !DENYLIST.contains(&key.as_str()));

            if info.abort_early() {
                let tasks = entries.map(|(key, value)| {
                    let key_input = Value::String(key.clone());
                    let key_info = info
                        .descend_with_origin(PathItem::record_key(input, key), Origin::Key);
                    let value_info = info.descend_with_origin(
                        PathItem::record_value(input, key, value),
                        Origin::Value,
                    );
                    async move {
                        let parsed_key = match self.key.parse_value(&key_input, &key_info).await {
                            Validation::Success(parsed) => parsed,
                            Validation::Failure(failure) => return Err(failure),
                        };
                        match self.value.parse_value(value, &value_info).await {
                            Validation::Success(parsed_value) => {
                                let output_key = parsed_key
                                    .as_str()
                                    .map(str::to_string)
                                    .unwrap_or_else(|| key.clone());
                                Ok((output_key, parsed_value))
                            }
                            Validation::Failure(failure) => Err(failure),
                        }
                    }
                });

                match try_join_all(tasks).await {
                    Ok(pairs) => ok(pairs.into_iter().collect()),
                    Err(failure) => err(failure),
                }
            } else {
                let tasks = entries.map(|(key, value)| {
                    let key_input = Value::String(key.clone());
                    let key_info = info
                        .descend_with_origin(PathItem::record_key(input, key), Origin::Key);
                    let value_info = info.descend_with_origin(
                        PathItem::record_value(input, key, value),
                        Origin::Value,
                    );
                    async move {
                        let key_result = self.key.parse_value(&key_input, &key_info).await;
                        let value_result = self.value.parse_value(value, &value_info).await;
                        match (key_result, value_result) {
                            (
                                Validation::Success(parsed_key),
                                Validation::Success(parsed_value),
                            ) => {
                                let output_key = parsed_key
                                    .as_str()
                                    .map(str::to_string)
                                    .unwrap_or_else(|| key.clone());
                                EntryOutcome::Parsed(output_key, parsed_value)
                            }
                            (key_result, value_result) => {
                                let mut issues = Vec::new();
                                if let Validation::Failure(failure) = key_result {
                                    issues.extend(failure);
                                }
                                if let Validation::Failure(failure) = value_result {
                                    issues.extend(failure);
                                }
                                EntryOutcome::Failed(issues)
                            }
                        }
                    }
                });

                let mut issues: Vec<Issue> = Vec::new();
                let mut output = Map::new();
                for outcome in join_all(tasks).await {
                    match outcome {
                        EntryOutcome::Parsed(key, value) => {
                            output.insert(key, value);
                        }
                        EntryOutcome::Failed(failure) => issues.extend(failure),
                    }
                }

                if issues.is_empty() {
                    ok(output)
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
        async move { self.parse(input, info).await.map(Value::Object) }.boxed()
    }
}
