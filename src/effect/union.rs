//! Async union schema.

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues, Reason};
use crate::info::ParseInfo;
use crate::{err, ok, Parsed};

use super::traits::{AsyncSchema, AsyncValueSchema};

/// The async rendition of the union schema.
///
/// First-match semantics require declaration order, so options are awaited
/// sequentially; each option still runs exactly once per attempt.
pub struct AsyncUnionSchema {
    options: Vec<Box<dyn AsyncValueSchema>>,
    type_error_message: Option<String>,
}

impl AsyncUnionSchema {
    /// Creates an async union schema from its ordered alternatives.
    pub fn new(options: Vec<Box<dyn AsyncValueSchema>>) -> Self {
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
}

impl AsyncSchema for AsyncUnionSchema {
    type Output = Value;

    fn kind(&self) -> &'static str {
        "union"
    }

    fn reason(&self) -> Reason {
        Reason::Type
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        async move {
            let mut collected: Vec<Issue> = Vec::new();

            for option in &self.options {
                match option.parse_value(input, info).await {
                    Validation::Success(output) => return ok(output),
                    Validation::Failure(failure) => collected.extend(failure),
                }
            }

            let message = self.type_error_message.as_deref().unwrap_or("Invalid type");
            err(Issues::single(
                info.type_issue("union", message, input).with_issues(collected),
            ))
        }
        .boxed()
    }

    fn parse_to_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        self.parse(input, info)
    }
}
