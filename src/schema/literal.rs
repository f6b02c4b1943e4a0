//! Literal schema: accepts exactly one value.

use serde_json::Value;

use crate::error::{Issues, Reason};
use crate::info::ParseInfo;
use crate::schema::traits::Schema;
use crate::{err, ok, Parsed};

/// A schema that accepts exactly one JSON value.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::literal("admin");
/// assert!(schema.parse(&json!("admin"), &ParseInfo::new()).is_success());
/// assert!(schema.parse(&json!("user"), &ParseInfo::new()).is_failure());
/// ```
pub struct LiteralSchema {
    literal: Value,
    type_error_message: Option<String>,
}

impl LiteralSchema {
    /// Creates a literal schema for the given value.
    pub fn new(literal: impl Into<Value>) -> Self {
        Self {
            literal: literal.into(),
            type_error_message: None,
        }
    }

    /// Returns the accepted value.
    pub fn literal(&self) -> &Value {
        &self.literal
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Schema for LiteralSchema {
    type Output = Value;

    fn kind(&self) -> &'static str {
        "literal"
    }

    fn reason(&self) -> Reason {
        Reason::Type
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        if input == &self.literal {
            ok(input.clone())
        } else {
            let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
            err(Issues::single(info.type_issue("literal", message, input)))
        }
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info)
    }
}
