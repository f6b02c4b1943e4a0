//! Wrapper schemas: sentinel handling around an inner schema.
//!
//! JSON has no `undefined`, so `null` is the only sentinel here: a missing
//! declared object key materializes as `null` before its entry schema runs.
//! The three accepting wrappers (`nullable`, `optional`, `nullish`) all
//! short-circuit on `null` but keep distinct kind tags; the three rejecting
//! wrappers refuse `null` with their own validation tags and defer
//! everything else to the wrapped schema.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{Issues, Reason};
use crate::info::ParseInfo;
use crate::schema::traits::{Schema, ValueSchema};
use crate::{err, ok, Parsed};

/// The six wrapper behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    /// Accept `null` (or return the configured default).
    Nullable,
    /// Accept an absent value, which this universe materializes as `null`.
    Optional,
    /// Accept both sentinel readings of `null`.
    Nullish,
    /// Reject `null`.
    NonNullable,
    /// Reject an absent value.
    NonOptional,
    /// Reject both.
    NonNullish,
}

impl WrapperKind {
    fn tag(&self) -> &'static str {
        match self {
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
            self,
            WrapperKind::Nullable | WrapperKind::Optional | WrapperKind::Nullish
        )
    }
}

/// A default to use when an accepting wrapper receives the sentinel.
///
/// Producers are invoked on every parse that hits the sentinel.
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    fn produce(&self) -> Value {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Producer(producer) => producer(),
        }
    }
}

/// A schema that inspects the sentinel and otherwise delegates to an inner
/// schema.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::nullable(Assay::string()).default("anonymous");
///
/// let result = schema.parse(&json!(null), &ParseInfo::new());
/// assert_eq!(result.into_result().unwrap(), json!("anonymous"));
/// ```
pub struct WrapperSchema {
    kind: WrapperKind,
    wrapped: Box<dyn ValueSchema>,
    default: Option<DefaultValue>,
}

impl WrapperSchema {
    /// Creates a wrapper of the given kind around an inner schema.
    pub fn new<S: Schema + 'static>(kind: WrapperKind, wrapped: S) -> Self {
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
        self.default = Some(DefaultValue::Producer(Arc::new(producer)));
        self
    }

    /// Returns the wrapper kind.
    pub fn wrapper_kind(&self) -> WrapperKind {
        self.kind
    }

    /// Returns the wrapped schema.
    pub fn wrapped(&self) -> &dyn ValueSchema {
        self.wrapped.as_ref()
    }
}

impl Schema for WrapperSchema {
    type Output = Value;

    fn kind(&self) -> &'static str {
        self.kind.tag()
    }

    fn reason(&self) -> Reason {
        Reason::Any
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        if input.is_null() {
            if self.kind.accepts_sentinel() {
                return match &self.default {
                    Some(default) => ok(default.produce()),
                    None => ok(Value::Null),
                };
            }
            return err(Issues::single(info.type_issue(
                self.kind.tag(),
                "Invalid type",
                input,
            )));
        }
        self.wrapped.parse_value(input, info)
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info)
    }
}
