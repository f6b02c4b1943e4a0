//! Async wrapper schemas.

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::error::{Issues, Reason};
use crate::info::ParseInfo;
use crate::schema::{DefaultValue, WrapperKind};
use crate::{err, ok, Parsed};

use super::traits::{AsyncSchema, AsyncValueSchema};

/// The async rendition of the wrapper schemas.
///
/// Sentinel handling happens before any suspension; only deferral to the
/// wrapped schema is latent.
pub struct AsyncWrapperSchema {
    kind: WrapperKind,
    wrapped: Box<dyn AsyncValueSchema>,
    default: Option<DefaultValue>,
}

impl AsyncWrapperSchema {
    /// Creates an async wrapper of the given kind around an inner schema.
    pub fn new<S: AsyncSchema + 'static>(kind: WrapperKind, wrapped: S) -> Self {
        Self {
            kind,
            wrapped: Box::new(wrapped),
            default: None,
        }
    }

    /// Sets a fixed default returned when the sentinel is received.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    /// Sets a producer invoked for the default on every sentinel parse.
    pub fn default_with<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Producer(std::sync::Arc::new(producer)));
        self
    }

    /// Returns the wrapped schema.
    pub fn wrapped(&self) -> &dyn AsyncValueSchema {
        self.wrapped.as_ref()
    }

    fn tag(&self) -> &'static str {
        match self.kind {
            WrapperKind::Nullable => "nullable",
            WrapperKind::Optional => "optional",
            WrapperKind::Nullish => "nullish",
            WrapperKind::NonNullable => "non_nullable",
            WrapperKind::NonOptional => "non_optional",
            WrapperKind::NonNullish => "non_nullish",
        }
    }

    fn accepts_sentinel(&self) -> bool {
        matches!(
            self.kind,
            WrapperKind::Nullable | WrapperKind::Optional | WrapperKind::Nullish
        )
    }
}

impl AsyncSchema for AsyncWrapperSchema {
    type Output = Value;

    fn kind(&self) -> &'static str {
        self.tag()
    }

    fn reason(&self) -> Reason {
        Reason::Any
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        if input.is_null() {
            if self.accepts_sentinel() {
                let produced = match &self.default {
                    Some(DefaultValue::Value(value)) => value.clone(),
                    Some(DefaultValue::Producer(producer)) => producer(),
                    None => Value::Null,
                };
                return futures::future::ready(ok(produced)).boxed();
            }
            let failure = err(Issues::single(info.type_issue(
                self.tag(),
                "Invalid type",
                input,
            )));
            return futures::future::ready(failure).boxed();
        }
        self.wrapped.parse_value(input, info)
    }

    fn parse_to_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        self.parse(input, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::IntoAsync;
    use crate::Assay;
    use serde_json::json;

    #[tokio::test]
    async fn test_accept_and_default() {
        let schema = AsyncWrapperSchema::new(
            WrapperKind::Nullable,
            Assay::string().into_async(),
        )
        .default("fallback");

        let output = schema
            .parse(&json!(null), &ParseInfo::new())
            .await
            .into_result()
            .unwrap();
        assert_eq!(output, json!("fallback"));
    }

    #[tokio::test]
    async fn test_reject_null() {
        let schema =
            AsyncWrapperSchema::new(WrapperKind::NonNullable, Assay::string().into_async());
        let issues = schema
            .parse(&json!(null), &ParseInfo::new())
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(issues.first().validation, "non_nullable");
    }

    #[tokio::test]
    async fn test_defers_to_wrapped() {
        let schema =
            AsyncWrapperSchema::new(WrapperKind::Nullish, Assay::string().into_async());
        assert!(schema
            .parse(&json!("hi"), &ParseInfo::new())
            .await
            .is_success());
        assert!(schema
            .parse(&json!(42), &ParseInfo::new())
            .await
            .is_failure());
    }
}
