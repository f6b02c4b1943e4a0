//! Record schema: an open mapping with a key schema and a value schema.

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, Issues, Origin, Reason};
use crate::info::ParseInfo;
use crate::path::PathItem;
use crate::schema::traits::{Schema, ValueSchema};
use crate::{err, ok, Parsed};

/// Keys that would alter a prototype chain in the source ecosystem; they
/// are skipped before any child parse so they can never reach the output.
const DENYLIST: [&str; 3] = ["__proto__", "prototype", "constructor"];

/// A schema for open JSON objects.
///
/// Every own key of the input (minus the pollution denylist) is parsed
/// through the key schema, and its value through the value schema. Key
/// issues carry origin `key`, value issues origin `value`; a failing key
/// does not skip the value under accumulation. The output keeps only the
/// entries where both sides succeeded.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::record(Assay::string(), Assay::number());
/// let result = schema.parse(&json!({ "a": 1, "b": 2 }), &ParseInfo::new());
/// assert!(result.is_success());
/// ```
pub struct RecordSchema {
    key: Box<dyn ValueSchema>,
    value: Box<dyn ValueSchema>,
    type_error_message: Option<String>,
}

impl RecordSchema {
    /// Creates a record schema from a key schema and a value schema.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Schema + 'static,
        V: Schema + 'static,
    {
        Self {
            key: Box::new(key),
            value: Box::new(value),
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

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Schema for RecordSchema {
    type Output = Map<String, Value>;

    fn kind(&self) -> &'static str {
        "record"
    }

    fn reason(&self) -> Reason {
        Reason::Record
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Map<String, Value>> {
        let obj = match input.as_object() {
            Some(o) => o,
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("record", message, input)));
            }
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut output = Map::new();

        for (key, value) in obj {
            if DENYLIST.contains(&key.as_str()) {
                continue;
            }

            let key_input = Value::String(key.clone());
            let key_info =
                info.descend_with_origin(PathItem::record_key(input, key), Origin::Key);
            let parsed_key = match self.key.parse_value(&key_input, &key_info) {
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
                .descend_with_origin(PathItem::record_value(input, key, value), Origin::Value);
            let parsed_value = match self.value.parse_value(value, &value_info) {
                Validation::Success(parsed) => Some(parsed),
                Validation::Failure(failure) => {
                    if info.abort_early() {
                        return err(failure);
                    }
                    issues.extend(failure);
                    None
                }
            };

            if let (Some(parsed_key), Some(parsed_value)) = (parsed_key, parsed_value) {
                let output_key = parsed_key
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| key.clone());
                output.insert(output_key, parsed_value);
            }
        }

        if issues.is_empty() {
            ok(output)
        } else {
            err(Issues::from_vec(issues))
        }
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(Value::Object)
    }
}
