//! Object schema: an unordered mapping with a fixed known key set.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::path::PathItem;
use crate::pipe::{self, actions, Pipe};
use crate::schema::traits::{Schema, ValueSchema};
use crate::{err, Parsed};

/// A schema for JSON objects with a declared key set.
///
/// Each declared entry is parsed in declaration order; a missing key is
/// materialized as `null` before its entry schema runs, so the entry's own
/// type gate decides whether absence is acceptable (wrap with
/// [`Assay::optional`](crate::Assay::optional) to tolerate it). Unknown
/// input keys are dropped. The output is a fresh map containing only
/// declared keys, in declaration order.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::object()
///     .entry("name", Assay::string().min_len(1))
///     .entry("age", Assay::number().min(0.0));
///
/// let result = schema.parse(
///     &json!({ "name": "Ada", "age": 30, "extra": "x" }),
///     &ParseInfo::new(),
/// );
/// let output = result.into_result().unwrap();
/// assert_eq!(output.len(), 2);
/// assert!(output.get("extra").is_none());
/// ```
pub struct ObjectSchema {
    entries: IndexMap<String, Box<dyn ValueSchema>>,
    pipe: Pipe<Map<String, Value>>,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates an object schema with no declared entries.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Declares an entry. Declaration order is preserved in the output.
    pub fn entry<S>(mut self, key: impl Into<String>, schema: S) -> Self
    where
        S: Schema + 'static,
    {
        self.entries.insert(key.into(), Box::new(schema));
        self
    }

    /// Appends a custom action to the object-level pipe.
    ///
    /// The action sees the fully assembled output map, so it can check
    /// relations between entries.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Map<String, Value>, &ValidateInfo) -> Parsed<Map<String, Value>>
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

    /// Returns the declared entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &dyn ValueSchema)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s.as_ref()))
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for ObjectSchema {
    type Output = Map<String, Value>;

    fn kind(&self) -> &'static str {
        "object"
    }

    fn reason(&self) -> Reason {
        Reason::Object
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Map<String, Value>> {
        let obj = match input.as_object() {
            Some(o) => o,
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("object", message, input)));
            }
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut output = Map::new();

        for (key, schema) in &self.entries {
            let value = obj.get(key).cloned().unwrap_or(Value::Null);
            let child_info = info.descend(PathItem::object_key(input, key, &value));

            match schema.parse_value(&value, &child_info) {
                Validation::Success(parsed) => {
                    output.insert(key.clone(), parsed);
                }
                Validation::Failure(failure) => {
                    if info.abort_early() {
                        return err(failure);
                    }
                    issues.extend(failure);
                }
            }
        }

        if !issues.is_empty() {
            return err(Issues::from_vec(issues));
        }
        pipe::run(output, &self.pipe, &info.validate_info(Reason::Object))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(Value::Object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::number::NumberSchema;
    use crate::schema::string::StringSchema;
    use crate::{ok, Assay};
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_empty_schema_accepts_any_object() {
        let schema = ObjectSchema::new();
        assert!(schema.parse(&json!({}), &ParseInfo::new()).is_success());
        assert!(schema
            .parse(&json!({ "anything": 1 }), &ParseInfo::new())
            .is_success());
    }

    #[test]
    fn test_rejects_non_object() {
        let schema = ObjectSchema::new();
        for input in [json!("x"), json!(1), json!(null), json!([1])] {
            let issues = unwrap_failure(schema.parse(&input, &ParseInfo::new()));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues.first().validation, "object");
            assert_eq!(issues.first().reason, Reason::Type);
        }
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let schema = ObjectSchema::new().entry("name", StringSchema::new());
        let output = unwrap_success(schema.parse(
            &json!({ "name": "Ada", "extra": "x" }),
            &ParseInfo::new(),
        ));
        assert_eq!(output.get("name"), Some(&json!("Ada")));
        assert!(output.get("extra").is_none());
    }

    #[test]
    fn test_missing_key_fails_through_child_gate() {
        let schema = ObjectSchema::new().entry("name", StringSchema::new());
        let issues = unwrap_failure(schema.parse(&json!({}), &ParseInfo::new()));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().validation, "string");
        assert_eq!(issues.first().input, Value::Null);
        assert_eq!(issues.first().path.to_string(), "name");
    }

    #[test]
    fn test_missing_key_accepted_when_optional() {
        let schema = ObjectSchema::new().entry("nickname", Assay::optional(StringSchema::new()));
        let output = unwrap_success(schema.parse(&json!({}), &ParseInfo::new()));
        assert_eq!(output.get("nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_error_accumulation_across_entries() {
        let schema = ObjectSchema::new()
            .entry("name", StringSchema::new())
            .entry("age", NumberSchema::new().min(0.0));

        let issues = unwrap_failure(schema.parse(
            &json!({ "name": 42, "age": -1 }),
            &ParseInfo::new(),
        ));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues.with_validation("string").len(), 1);
        assert_eq!(issues.with_validation("min_value").len(), 1);
    }

    #[test]
    fn test_entry_issues_in_declaration_order() {
        let schema = ObjectSchema::new()
            .entry("z", StringSchema::new())
            .entry("a", StringSchema::new())
            .entry("m", StringSchema::new());

        let issues = unwrap_failure(schema.parse(&json!({}), &ParseInfo::new()));
        let paths: Vec<_> = issues.iter().map(|i| i.path.to_string()).collect();
        assert_eq!(paths, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_nested_object_paths() {
        let inner = ObjectSchema::new().entry("value", NumberSchema::new().min(0.0));
        let middle = ObjectSchema::new().entry("inner", inner);
        let outer = ObjectSchema::new().entry("middle", middle);

        let issues = unwrap_failure(outer.parse(
            &json!({ "middle": { "inner": { "value": -5 } } }),
            &ParseInfo::new(),
        ));
        assert_eq!(issues.first().path.to_string(), "middle.inner.value");
        assert_eq!(issues.first().input, json!(-5.0));
    }

    #[test]
    fn test_abort_early_returns_first_child_failure() {
        let schema = ObjectSchema::new()
            .entry("name", StringSchema::new())
            .entry("age", NumberSchema::new().min(0.0));

        let issues = unwrap_failure(schema.parse(
            &json!({ "name": 42, "age": -1 }),
            &ParseInfo::new().with_abort_early(true),
        ));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().path.to_string(), "name");
    }

    #[test]
    fn test_object_pipe_sees_assembled_output() {
        let schema = ObjectSchema::new()
            .entry("min", NumberSchema::new())
            .entry("max", NumberSchema::new())
            .custom(|output, info| {
                let lo = output.get("min").and_then(Value::as_f64).unwrap_or(0.0);
                let hi = output.get("max").and_then(Value::as_f64).unwrap_or(0.0);
                if lo > hi {
                    err(Issues::single(info.issue(
                        "custom",
                        "min must not exceed max",
                        &Value::Object(output.clone()),
                    )))
                } else {
                    ok(output.clone())
                }
            });

        assert!(schema
            .parse(&json!({ "min": 1, "max": 2 }), &ParseInfo::new())
            .is_success());

        let issues = unwrap_failure(schema.parse(
            &json!({ "min": 3, "max": 2 }),
            &ParseInfo::new(),
        ));
        assert_eq!(issues.first().reason, Reason::Object);
        assert_eq!(issues.first().validation, "custom");
    }

    #[test]
    fn test_pipe_not_run_when_entries_fail() {
        let schema = ObjectSchema::new()
            .entry("n", NumberSchema::new())
            .custom(|_, info| {
                err(Issues::single(info.issue(
                    "custom",
                    "pipe ran",
                    &Value::Null,
                )))
            });

        let issues = unwrap_failure(schema.parse(&json!({ "n": "x" }), &ParseInfo::new()));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().validation, "number");
    }
}
