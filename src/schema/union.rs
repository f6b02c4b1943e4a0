//! Union schema: first-match-wins over ordered alternatives.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::ParseInfo;
use crate::schema::traits::{Schema, ValueSchema};
use crate::{err, ok, Parsed};

/// A schema that accepts the first matching alternative.
///
/// Options are tried in declaration order; each option's parse runs exactly
/// once per attempt, and the first success is returned from that single
/// invocation. When every option fails, the result is one synthetic issue
/// tagged `union` whose nested issues concatenate each alternative's
/// failures for diagnostics.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema, ValueSchema};
/// use serde_json::json;
///
/// let schema = Assay::union(vec![
///     Box::new(Assay::literal("a")) as Box<dyn ValueSchema>,
///     Box::new(Assay::literal("b")) as Box<dyn ValueSchema>,
/// ]);
///
/// assert!(schema.parse(&json!("a"), &ParseInfo::new()).is_success());
/// assert!(schema.parse(&json!("c"), &ParseInfo::new()).is_failure());
/// ```
pub struct UnionSchema {
    options: Vec<Box<dyn ValueSchema>>,
    type_error_message: Option<String>,
}

impl UnionSchema {
    /// Creates a union schema from its ordered alternatives.
    pub fn new(options: Vec<Box<dyn ValueSchema>>) -> Self {
        Self {
            options,
            type_error_message: None,
        }
    }

    /// Overrides the exhaustion error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the alternatives in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &dyn ValueSchema> {
        self.options.iter().map(|s| s.as_ref())
    }
}

impl Schema for UnionSchema {
    type Output = Value;

    fn kind(&self) -> &'static str {
        "union"
    }

    fn reason(&self) -> Reason {
        Reason::Type
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        let mut collected: Vec<Issue> = Vec::new();

        for option in &self.options {
            match option.parse_value(input, info) {
                Validation::Success(output) => return ok(output),
                Validation::Failure(failure) => collected.extend(failure),
            }
        }

        let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
        err(Issues::single(
            info.type_issue("union", message, input).with_issues(collected),
        ))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::literal::LiteralSchema;
    use crate::schema::number::NumberSchema;
    use crate::schema::string::StringSchema;
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_first_match_wins() {
        // Both options accept strings; the first one's transform must win.
        let schema = UnionSchema::new(vec![
            Box::new(StringSchema::new().lowercase()) as Box<dyn ValueSchema>,
            Box::new(StringSchema::new()) as Box<dyn ValueSchema>,
        ]);

        let output = schema
            .parse(&json!("ABC"), &ParseInfo::new())
            .into_result()
            .unwrap();
        assert_eq!(output, json!("abc"));
    }

    #[test]
    fn test_later_option_can_match() {
        let schema = UnionSchema::new(vec![
            Box::new(StringSchema::new()) as Box<dyn ValueSchema>,
            Box::new(NumberSchema::new()) as Box<dyn ValueSchema>,
        ]);
        assert!(schema.parse(&json!(7), &ParseInfo::new()).is_success());
    }

    #[test]
    fn test_exhaustion_collects_nested_issues() {
        let schema = UnionSchema::new(vec![
            Box::new(LiteralSchema::new("a")) as Box<dyn ValueSchema>,
            Box::new(LiteralSchema::new("b")) as Box<dyn ValueSchema>,
        ]);

        let issues = unwrap_failure(schema.parse(&json!("c"), &ParseInfo::new()));
        assert_eq!(issues.len(), 1);

        let issue = issues.first();
        assert_eq!(issue.validation, "union");
        assert_eq!(issue.reason, Reason::Type);
        assert_eq!(issue.input, json!("c"));

        let nested = issue.issues.as_ref().unwrap();
        assert_eq!(nested.len(), 2);
        assert!(nested.iter().all(|i| i.validation == "literal"));
        assert!(nested.iter().all(|i| i.input == json!("c")));
    }

    #[test]
    fn test_exhaustion_is_single_issue_even_without_abort() {
        let schema = UnionSchema::new(vec![
            Box::new(NumberSchema::new()) as Box<dyn ValueSchema>,
            Box::new(NumberSchema::new()) as Box<dyn ValueSchema>,
        ]);
        let issues = unwrap_failure(schema.parse(&json!("x"), &ParseInfo::new()));
        assert_eq!(issues.len(), 1);
    }
}
