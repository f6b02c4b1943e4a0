//! String schema.
//!
//! [`StringSchema`] gates on string inputs and runs its pipe over the owned
//! string. Builder methods append the built-in actions; `custom` appends an
//! arbitrary one.

use regex::Regex;
use serde_json::Value;

use crate::error::{Issues, Reason};
use crate::info::{ParseInfo, ValidateInfo};
use crate::pipe::{self, actions, Action, Pipe};
use crate::schema::traits::Schema;
use crate::{err, Parsed};

/// A schema for string values.
///
/// The type gate accepts JSON strings; everything after the gate is the
/// pipe, so transforms and checks interleave in declaration order.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::string().trim().min_len(3).max_len(20);
///
/// let result = schema.parse(&json!("  ada  "), &ParseInfo::new());
/// assert_eq!(result.into_result().unwrap(), "ada");
/// ```
pub struct StringSchema {
    pipe: Pipe<String>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a string schema with an empty pipe.
    pub fn new() -> Self {
        Self {
            pipe: Pipe::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.pipe.push(actions::min_length(min));
        self
    }

    /// Requires at most `max` characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.pipe.push(actions::max_length(max));
        self
    }

    /// Requires the string to match a regex pattern.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.pipe.push(actions::pattern(regex));
        Ok(self)
    }

    /// Requires a plausible email address.
    pub fn email(mut self) -> Self {
        self.pipe.push(actions::email());
        self
    }

    /// Requires the string to start with `prefix`.
    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.pipe.push(actions::starts_with(prefix));
        self
    }

    /// Requires the string to end with `suffix`.
    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.pipe.push(actions::ends_with(suffix));
        self
    }

    /// Requires the string to contain `substring`.
    pub fn contains(mut self, substring: impl Into<String>) -> Self {
        self.pipe.push(actions::contains(substring));
        self
    }

    /// Trims surrounding whitespace before later actions run.
    pub fn trim(mut self) -> Self {
        self.pipe.push(actions::to_trimmed());
        self
    }

    /// Lowercases the string before later actions run.
    pub fn lowercase(mut self) -> Self {
        self.pipe.push(actions::to_lowercase());
        self
    }

    /// Appends a custom action to the pipe.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&String, &ValidateInfo) -> Parsed<String> + Send + Sync + 'static,
    {
        self.pipe.push(actions::custom(check));
        self
    }

    /// Appends a prebuilt action to the pipe.
    pub fn action(mut self, action: Action<String>) -> Self {
        self.pipe.push(action);
        self
    }

    /// Overrides the type-gate error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for StringSchema {
    type Output = String;

    fn kind(&self) -> &'static str {
        "string"
    }

    fn reason(&self) -> Reason {
        Reason::String
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<String> {
        let value = match input.as_str() {
            Some(s) => s.to_string(),
            None => {
                let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
                return err(Issues::single(info.type_issue("string", message, input)));
            }
        };
        pipe::run(value, &self.pipe, &info.validate_info(Reason::String))
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info).map(Value::String)
    }
}
