//! Boolean schema.

use serde_json::Value;

use crate::error::{Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::pipe::{self, actions, Pipe};
use crate::schema::traits::Schema;
use crate::{err, Parsed};

/// A schema for boolean values.
pub struct BooleanSchema {
    pipe: Pipe<bool>,
    type_error_message: Option<String>,
}

impl BooleanSchema {
    /// Creates a boolean schema with an empty pipe.
    pub fn new() -> Self {
        Self {
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Appends a custom action to the pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&bool, &ValidateInfo) -> Parsed<bool> + Send + Sync + 'static,
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

impl Default for BooleanSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for BooleanSchema {
    type Output = bool;

    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn reason(&self) -> Reason {
        Reason::Boolean
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<bool> {
        let value = match input.as_bool() {
            Some(b) => b,
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("boolean", message, input)));
            }
        };
        pipe::run(value, &self.pipe, &info.validate_info(Reason::Boolean))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(Value::Bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gate() {
        let schema = BooleanSchema::new();
        assert!(schema.parse(&json!(true), &ParseInfo::new()).is_success());
        assert!(schema.parse(&json!(false), &ParseInfo::new()).is_success());

        let issues = schema
            .parse(&json!(1), &ParseInfo::new())
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().validation, "boolean");
    }
}
