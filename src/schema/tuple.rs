//! Tuple schema: a heterogeneous fixed-length sequence with optional rest.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::path::PathItem;
use crate::pipe::{self, actions, Pipe};
use crate::schema::traits::{Schema, ValueSchema};
use crate::{err, Parsed};

/// A schema for heterogeneous fixed-length JSON arrays.
///
/// Without a rest schema, the input length must equal the number of
/// declared items; with one, it must be at least that, and every extra
/// position parses through the rest schema. Declared and rest positions
/// share the tuple-index path kind and the same failure channel.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema, ValueSchema};
/// use serde_json::json;
///
/// let schema = Assay::tuple(vec![
///     Box::new(Assay::string()) as Box<dyn ValueSchema>,
///     Box::new(Assay::number()) as Box<dyn ValueSchema>,
/// ])
/// .rest(Assay::boolean());
///
/// assert!(schema
///     .parse(&json!(["id", 7, true, false]), &ParseInfo::new())
///     .is_success());
/// ```
pub struct TupleSchema {
    items: Vec<Box<dyn ValueSchema>>,
    rest: Option<Box<dyn ValueSchema>>,
    pipe: Pipe<Vec<Value>>,
    type_error_message: Option<String>,
}

impl TupleSchema {
    /// Creates a tuple schema from its declared item schemas.
    pub fn new(items: Vec<Box<dyn ValueSchema>>) -> Self {
        Self {
            items,
            rest: None,
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Accepts extra trailing positions, each parsed through `rest`.
    pub fn rest<S: Schema + 'static>(mut self, rest: S) -> Self {
        self.rest = Some(Box::new(rest));
        self
    }

    /// Appends a custom action to the tuple-level pipe.
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

    /// Returns the declared item schemas.
    pub fn items(&self) -> impl Iterator<Item = &dyn ValueSchema> {
        self.items.iter().map(|s| s.as_ref())
    }

    /// Returns the rest schema, if any.
    pub fn rest_schema(&self) -> Option<&dyn ValueSchema> {
        self.rest.as_deref()
    }

    fn length_matches(&self, len: usize) -> bool {
        match self.rest {
            Some(_) => len >= self.items.len(),
            None => len == self.items.len(),
        }
    }
}

impl Schema for TupleSchema {
    type Output = Vec<Value>;

    fn kind(&self) -> &'static str {
        "tuple"
    }

    fn reason(&self) -> Reason {
        Reason::Tuple
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Vec<Value>> {
        let arr = match input.as_array() {
            Some(a) if self.length_matches(a.len()) => a,
            _ => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("tuple", message, input)));
            }
        };

        let mut issues: Vec<Issue> = Vec::new();
        let mut output = Vec::with_capacity(arr.len());

        for (index, item) in arr.iter().enumerate() {
            // Positions past the declared items parse through the rest
            // schema; the length gate guarantees it exists here.
            let schema = match self.items.get(index) {
                Some(schema) => schema.as_ref(),
                None => match self.rest.as_deref() {
                    Some(rest) => rest,
                    None => break,
                },
            };

            let child_info = info.descend(PathItem::tuple_index(input, index, item));
            match schema.parse_value(item, &child_info) {
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
        pipe::run(output, &self.pipe, &info.validate_info(Reason::Tuple))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(Value::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::boolean::BooleanSchema;
    use crate::schema::number::NumberSchema;
    use crate::schema::string::StringSchema;
    use serde_json::json;

    fn pair() -> TupleSchema {
        TupleSchema::new(vec![
            Box::new(StringSchema::new()) as Box<dyn ValueSchema>,
            Box::new(NumberSchema::new()) as Box<dyn ValueSchema>,
        ])
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_parses_positions_through_their_schemas() {
        let output = pair()
            .parse(&json!(["id", 7]), &ParseInfo::new())
            .into_result()
            .unwrap();
        assert_eq!(output, vec![json!("id"), json!(7)]);
    }

    #[test]
    fn test_length_must_match_without_rest() {
        for input in [json!(["id"]), json!(["id", 7, 8]), json!([])] {
            let issues = unwrap_failure(pair().parse(&input, &ParseInfo::new()));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues.first().validation, "tuple");
        }
    }

    #[test]
    fn test_rest_accepts_extra_positions() {
        let schema = pair().rest(BooleanSchema::new());
        assert!(schema
            .parse(&json!(["id", 7]), &ParseInfo::new())
            .is_success());
        assert!(schema
            .parse(&json!(["id", 7, true, false]), &ParseInfo::new())
            .is_success());

        // Still at least the declared length.
        assert!(schema.parse(&json!(["id"]), &ParseInfo::new()).is_failure());
    }

    #[test]
    fn test_rest_issues_share_tuple_index_paths() {
        let schema = pair().rest(BooleanSchema::new());
        let issues = unwrap_failure(schema.parse(
            &json!(["id", 7, "not-bool"]),
            &ParseInfo::new(),
        ));
        assert_eq!(issues.first().validation, "boolean");
        assert_eq!(issues.first().path.to_string(), "[2]");
    }

    #[test]
    fn test_accumulates_across_positions() {
        let issues = unwrap_failure(pair().parse(&json!([7, "id"]), &ParseInfo::new()));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_abort_early_first_position_only() {
        let issues = unwrap_failure(pair().parse(
            &json!([7, "id"]),
            &ParseInfo::new().with_abort_early(true),
        ));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.first().path.to_string(), "[0]");
    }

    #[test]
    fn test_rejects_non_array() {
        let issues = unwrap_failure(pair().parse(&json!({}), &ParseInfo::new()));
        assert_eq!(issues.first().validation, "tuple");
        assert_eq!(issues.first().reason, Reason::Type);
    }
}
