//! Async map schema (entries form).

use futures::future::{join_all, try_join_all, BoxFuture, FutureExt};
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Origin, Reason};
use crate::info::ParseInfo;
use crate::path::PathItem;
use crate::{err, ok, Parsed};

use super::traits::{AsyncSchema, AsyncValueSchema};

/// The async rendition of the map schema.
///
/// Entries run concurrently; key and value sides within one entry are
/// sequenced, and both surface under accumulation.
pub struct AsyncMapSchema {
    key: Box<dyn AsyncValueSchema>,
    value: Box<dyn AsyncValueSchema>,
    type_error_message: Option<String>,
}

impl AsyncMapSchema {
    /// Creates an async map schema from key and value schemas.
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

enum EntryOutcome {
    Parsed(Value, Value),
    Failed(Vec<Issue>),
}

fn entries_to_value(entries: Vec<(Value, Value)>) -> Value {
    Value::Array(
        entries
            .into_iter()
            .map(|(k, v)| Value::Array(vec![k, v]))
            .collect(),
    )
}

impl AsyncSchema for AsyncMapSchema {
    type Output = Vec<(Value, Value)>;

    fn kind(&self) -> &'static str {
        "map"
    }

    fn reason(&self) -> Reason {
        Reason::Map
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Vec<(Value, Value)>>> {
        async move {
            let arr = match input.as_array() {
                Some(a) => a,
                None => {
                    let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                    return err(Issues::single(info.type_issue("map", message, input)));
                }
            };

            if info.abort_early() {
                let tasks = arr.iter().enumerate().map(|(index, entry)| async move {
                    let pair = match entry.as_array() {
                        Some(pair) if pair.len() == 2 => pair,
                        _ => {
                            let side = info.descend_with_origin(
                                PathItem::map_key(input, index, entry),
                                Origin::Key,
                            );
                            return Err(Issues::single(side.issue(
                                Reason::Map,
                                "map",
                                "Invalid entry",
                                entry,
                            )));
                        }
                    };

                    let key_info = info.descend_with_origin(
                        PathItem::map_key(input, index, &pair[0]),
                        Origin::Key,
                    );
                    let parsed_key = match self.key.parse_value(&pair[0], &key_info).await {
                        Validation::Success(parsed) => parsed,
                        Validation::Failure(failure) => return Err(failure),
                    };

                    let value_info = info.descend_with_origin(
                        PathItem::map_value(input, index, &pair[1]),
                        Origin::Value,
                    );
                    match self.value.parse_value(&pair[1], &value_info).await {
                        Validation::Success(parsed_value) => Ok((parsed_key, parsed_value)),
                        Validation::Failure(failure) => Err(failure),
                    }
                });

                match try_join_all(tasks).await {
                    Ok(entries) => ok(entries),
                    Err(failure) => err(failure),
                }
            } else {
                let tasks = arr.iter().enumerate().map(|(index, entry)| async move {
                    let pair = match entry.as_array() {
                        Some(pair) if pair.len() == 2 => pair,
                        _ => {
                            let side = info.descend_with_origin(
                                PathItem::map_key(input, index, entry),
                                Origin::Key,
                            );
                            return EntryOutcome::Failed(vec![side.issue(
                                Reason::Map,
                                "map",
                                "Invalid entry",
                                entry,
                            )]);
                        }
                    };

                    let key_info = info.descend_with_origin(
                        PathItem::map_key(input, index, &pair[0]),
                        Origin::Key,
                    );
                    let key_result = self.key.parse_value(&pair[0], &key_info).await;

                    let value_info = info.descend_with_origin(
                        PathItem::map_value(input, index, &pair[1]),
                        Origin::Value,
                    );
                    let value_result = self.value.parse_value(&pair[1], &value_info).await;

                    match (key_result, value_result) {
                        (Validation::Success(key), Validation::Success(value)) => {
                            EntryOutcome::Parsed(key, value)
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
                });

                let mut issues: Vec<Issue> = Vec::new();
                let mut output = Vec::with_capacity(arr.len());
                for outcome in join_all(tasks).await {
                    match outcome {
                        EntryOutcome::Parsed(key, value) => output.push((key, value)),
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
        async move { self.parse(input, info).await.map(entries_to_value) }.boxed()
    }
}
