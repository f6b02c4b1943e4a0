//! Map schema: a keyed container with arbitrary key type.
//!
//! JSON objects cannot carry non-string keys, so map inputs use the entries
//! form: an array of `[key, value]` pairs. The output is the fresh entries
//! array with both sides parsed.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Origin, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::path::PathItem;
use crate::pipe::{self, actions, Pipe};
use crate::schema::traits::{Schema, ValueSchema};
use crate::{err, Parsed};

/// A schema for maps in entries form.
///
/// Each entry's key parses through the key schema (origin `key`) and its
/// value through the value schema (origin `value`); neither side
/// short-circuits the other under accumulation. The output keeps only
/// entries where both sides succeeded.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::map(Assay::number(), Assay::string());
/// let result = schema.parse(&json!([[1, "one"], [2, "two"]]), &ParseInfo::new());
/// assert!(result.is_success());
/// ```
pub struct MapSchema {
    key: Box<dyn ValueSchema>,
    value: Box<dyn ValueSchema>,
    pipe: Pipe<Vec<(Value, Value)>>,
    type_error_message: Option<String>,
}

impl MapSchema {
    /// Creates a map schema from a key schema and a value schema.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Schema + 'static,
        V: Schema + 'static,
    {
        Self {
            key: Box::new(key),
            value: Box::new(value),
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Returns the key schema.
    pub fn key(&self) -> &dyn ValueSchema {
        self.key.as_ref()
    }

    /// Returns the value schema.
    pub fn value(&self) -> &dyn ValueSchema {
        self.value.as_ref()
    }

    /// Appends a custom action to the map-level pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Vec<(Value, Value)>, &ValidateInfo) -> Parsed<Vec<(Value, Value)>>
            + Send
            + Sync
            + 'static,
    {
        self.pipe.push(actions::custom(check));
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

fn entries_to_value(entries: Vec<(Value, Value)>) -> Value {
    Value::Array(
        entries
            .into_iter()
            .map(|(k, v)| Value::Array(vec![k, v]))
            .collect(),
    )
}

impl Schema for MapSchema {
    type Output = Vec<(Value, Value)>;

    fn kind(&self) -> &'static str {
        "map"
    }

    fn reason(&self) -> Reason {
        Reason::Map
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Vec<(Value, Value)>> {
        let arr = match input.as_array() {
            Some(a) => a,
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("map", message, input)));
            }
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut output = Vec::with_capacity(arr.len());

        for (index, entry) in arr.iter().enumerate() {
            let pair = match entry.as_array() {
                Some(pair) if pair.len() == 2 => pair,
                _ => {
                    let side = info
                        .descend_with_origin(PathItem::map_key(input, index, entry), Origin::Key);
                    let issue = side.issue(Reason::Map, "map", "Invalid entry", entry);
                    if info.abort_early() {
                        return err(Issues::single(issue));
                    }
                    issues.push(issue);
                    continue;
                }
            };

            let key_info = info
                .descend_with_origin(PathItem::map_key(input, index, &pair[0]), Origin::Key);
            let parsed_key = match self.key.parse_value(&pair[0], &key_info) {
                Validation::Success(parsed) => Some(parsed),
                Validation::Failure(failure) => {
                    if info.abort_early() {
                        return err(failure);
                    }
                    issues.extend(failure);
                    None
                }
            };

            let value_info = info
                .descend_with_origin(PathItem::map_value(input, index, &pair[1]), Origin::Value);
            let parsed_value = match self.value.parse_value(&pair[1], &value_info) {
                Validation::Success(parsed) => Some(parsed),
                Validation::Failure(failure) => {
                    if info.abort_early() {
                        return err(failure);
                    }
                    issues.extend(failure);
                    None
                }
            };

            if let (Some(key), Some(value)) = (parsed_key, parsed_value) {
                output.push((key, value));
            }
        }

        if !issues.is_empty() {
            return err(Issues::from_vec(issues));
        }
        pipe::run(output, &self.pipe, &info.validate_info(Reason::Map))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(entries_to_value)
    }
}
