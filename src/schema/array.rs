//! Array schema: a homogeneous sequence.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::path::PathItem;
use crate::pipe::{self, actions, Action, Pipe};
use crate::schema::traits::Schema;
use crate::{err, Parsed};

/// A schema for homogeneous JSON arrays.
///
/// Each element is parsed through the item schema in index order; the
/// output is a fresh vector preserving that order. The array-level pipe
/// runs over the assembled output.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::array(Assay::string().min_len(2)).min_size(1);
///
/// assert!(schema.parse(&json!(["hi", "ok"]), &ParseInfo::new()).is_success());
/// assert!(schema.parse(&json!(["hi", "a"]), &ParseInfo::new()).is_failure());
/// ```
pub struct ArraySchema<S> {
    item: S,
    pipe: Pipe<Vec<Value>>,
    type_error_message: Option<String>,
}

impl<S: Schema> ArraySchema<S> {
    /// Creates an array schema from an item schema.
    pub fn new(item: S) -> Self {
        Self {
            item,
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` elements.
    pub fn min_size(mut self, min: usize) -> Self {
        self.pipe.push(actions::min_size(min));
        self
    }

    /// Requires at most `max` elements.
    pub fn max_size(mut self, max: usize) -> Self {
        self.pipe.push(actions::max_size(max));
        self
    }

    /// Appends a custom action to the array-level pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Vec<Value>, &ValidateInfo) -> Parsed<Vec<Value>> + Send + Sync + 'static,
    {
        self.pipe.push(actions::custom(check));
        self
    }

    /// Appends a prebuilt action to the array-level pipe.
    pub fn action(mut self, action: Action<Vec<Value>>) -> Self {
        self.pipe.push(action);
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the item schema.
    pub fn item(&self) -> &S {
        &self.item
    }
}

impl<S: Schema> Schema for ArraySchema<S> {
    type Output = Vec<Value>;

    fn kind(&self) -> &'static str {
        "array"
    }

    fn reason(&self) -> Reason {
        Reason::Array
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Vec<Value>> {
        let arr = match input.as_array() {
            Some(a) => a,
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("array", message, input)));
            }
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut output = Vec::with_capacity(arr.len());

        for (index, item) in arr.iter().enumerate() {
            let child_info = info.descend(PathItem::array_index(input, index, item));
            match self.item.parse_to_value(item, &child_info) {
                Validation::Success(parsed) => output.push(parsed),
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
        pipe::run(output, &self.pipe, &info.validate_info(Reason::Array))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::number::NumberSchema;
    use crate::schema::string::StringSchema;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_parses_items_in_order() {
        let schema = ArraySchema::new(StringSchema::new());
        let output = schema
            .parse(&json!(["a", "b"]), &ParseInfo::new())
            .into_result()
            .unwrap();
        assert_eq!(output, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_empty_array() {
        let schema = ArraySchema::new(StringSchema::new());
        assert!(schema.parse(&json!([]), &ParseInfo::new()).is_success());
    }

    #[test]
    fn test_rejects_non_array() {
        let schema = ArraySchema::new(StringSchema::new());
        let issues = unwrap_failure(schema.parse(&json!("no"), &ParseInfo::new()));
        assert_eq!(issues.first().validation, "array");
        assert_eq!(issues.first().reason, Reason::Type);
    }

    #[test]
    fn test_item_issue_paths_carry_index() {
        let schema = ArraySchema::new(StringSchema::new().min_len(2));
        let issues = unwrap_failure(schema.parse(&json!(["hi", "a", "ok"]), &ParseInfo::new()));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().validation, "min_length");
        assert_eq!(issues.first().path.to_string(), "[1]");
        assert_eq!(issues.first().input, json!("a"));
    }

    #[test]
    fn test_accumulates_across_items() {
        let schema = ArraySchema::new(NumberSchema::new().min(0.0));
        let issues = unwrap_failure(schema.parse(&json!([-1, 2, -3]), &ParseInfo::new()));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_abort_early_stops_at_first_item() {
        let schema = ArraySchema::new(NumberSchema::new().min(0.0));
        let issues = unwrap_failure(schema.parse(
            &json!([-1, 2, -3]),
            &ParseInfo::new().with_abort_early(true),
        ));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().path.to_string(), "[0]");
    }

    #[test]
    fn test_size_bounds_run_after_items() {
        let schema = ArraySchema::new(StringSchema::new()).min_size(2);
        let issues = unwrap_failure(schema.parse(&json!(["only"]), &ParseInfo::new()));
        assert_eq!(issues.first().validation, "min_size");
        assert_eq!(issues.first().reason, Reason::Array);
    }
}
