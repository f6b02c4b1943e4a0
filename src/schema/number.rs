//! Number schema.

use serde_json::Value;

use crate::error::{Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::pipe::{self, actions, Action, Pipe};
use crate::schema::traits::Schema;
use crate::{err, Parsed};

/// A schema for numeric values.
///
/// The type gate accepts any JSON number (integer or float) as an `f64`.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::number().min(0.0).max(100.0);
///
/// assert!(schema.parse(&json!(42), &ParseInfo::new()).is_success());
/// assert!(schema.parse(&json!(-1), &ParseInfo::new()).is_failure());
/// ```
pub struct NumberSchema {
    pipe: Pipe<f64>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates a number schema with an empty pipe.
    pub fn new() -> Self {
        Self {
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Requires a value of at least `min` (inclusive).
    pub fn min(mut self, min: f64) -> Self {
        self.pipe.push(actions::min_value(min));
        self
    }

    /// Requires a value of at most `max` (inclusive).
    pub fn max(mut self, max: f64) -> Self {
        self.pipe.push(actions::max_value(max));
        self
    }

    /// Appends a custom action to the pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&f64, &ValidateInfo) -> Parsed<f64> + Send + Sync + 'static,
    {
        self.pipe.push(actions::custom(check));
        self
    }

    /// Appends a prebuilt action to the pipe.
    pub fn action(mut self, action: Action<f64>) -> Self {
        self.pipe.push(action);
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for NumberSchema {
    type Output = f64;

    fn kind(&self) -> &'static str {
        "number"
    }

    fn reason(&self) -> Reason {
        Reason::Number
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<f64> {
        let value = match input.as_f64() {
            Some(n) => n,
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("number", message, input)));
            }
        };
        pipe::run(value, &self.pipe, &info.validate_info(Reason::Number))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        // Keep the input's own number representation when the pipe did not
        // change the value, so integer inputs round-trip as integers.
        self.parse(input, info).map(|output| {
            if input.as_f64() == Some(output) {
                input.clone()
            } else {
                Value::from(output)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_integers_and_floats() {
        let schema = NumberSchema::new();
        assert_eq!(
            schema.parse(&json!(30), &ParseInfo::new()).into_result().unwrap(),
            30.0
        );
        assert_eq!(
            schema.parse(&json!(1.5), &ParseInfo::new()).into_result().unwrap(),
            1.5
        );
    }

    #[test]
    fn test_rejects_non_number() {
        let schema = NumberSchema::new();
        let issues = schema
            .parse(&json!("30"), &ParseInfo::new())
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().validation, "number");
        assert_eq!(issues.first().reason, Reason::Type);
    }

    #[test]
    fn test_bounds() {
        let schema = NumberSchema::new().min(0.0).max(10.0);
        assert!(schema.parse(&json!(0), &ParseInfo::new()).is_success());
        assert!(schema.parse(&json!(10), &ParseInfo::new()).is_success());

        let issues = schema
            .parse(&json!(-1), &ParseInfo::new())
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().validation, "min_value");
        assert_eq!(issues.first().input, json!(-1.0));
    }
}
