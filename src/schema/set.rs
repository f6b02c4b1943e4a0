//! Set schema: an unordered container of unique values.

use std::collections::HashSet;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::path::PathItem;
use crate::pipe::{self, actions, Pipe};
use crate::schema::traits::Schema;
use crate::{err, Parsed};

/// A schema for sets, represented as JSON arrays with duplicates removed.
///
/// Values parse in iteration order with a monotonically increasing
/// set-index path tag; the output is a fresh array deduplicated by JSON
/// equality, first occurrence wins.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::set(Assay::string());
/// let output = schema
///     .parse(&json!(["a", "b", "a"]), &ParseInfo::new())
///     .into_result()
///     .unwrap();
/// assert_eq!(output, vec![json!("a"), json!("b")]);
/// ```
pub struct SetSchema<S> {
    value: S,
    pipe: Pipe<Vec<Value>>,
    type_error_message: Option<String>,
}

impl<S: Schema> SetSchema<S> {
    /// Creates a set schema from a value schema.
    pub fn new(value: S) -> Self {
        Self {
            value,
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Appends a custom action to the set-level pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Vec<Value>, &ValidateInfo) -> Parsed<Vec<Value>> + Send + Sync + 'static,
    {
        self.pipe.push(actions::custom(check));
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the value schema.
    pub fn value(&self) -> &S {
        &self.value
    }
}

impl<S: Schema> Schema for SetSchema<S> {
    type Output = Vec<Value>;

    fn kind(&self) -> &'static str {
        "set"
    }

    fn reason(&self) -> Reason {
        Reason::Set
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Vec<Value>> {
        let arr = match input.as_array() {
            Some(a) => a,
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("set", message, input)));
            }
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut output = Vec::with_capacity(arr.len());
        // Dedup by serialized form, as JSON values are not hashable directly.
        let mut seen: HashSet<String> = HashSet::new();

        for (index, item) in arr.iter().enumerate() {
            let child_info = info.descend(PathItem::set_index(input, index, item));
            match self.value.parse_to_value(item, &child_info) {
                Validation::Success(parsed) => {
                    let fingerprint = serde_json::to_string(&parsed)
                        .unwrap_or_else(|_| format!("{:?}", parsed));
                    if seen.insert(fingerprint) {
                        output.push(parsed);
                    }
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
        pipe::run(output, &self.pipe, &info.validate_info(Reason::Set))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(Value::Array)
    }
}
