//! Recursive schema: a lazy indirection for self-referential shapes.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::Reason;
use crate::info::ParseInfo;
use crate::schema::traits::{Schema, ValueSchema};
use crate::Parsed;

/// A schema that resolves its inner schema on first parse.
///
/// The thunk runs at most once per instance; the resolved schema is cached
/// behind a double-checked lock, so concurrent parses of a shared instance
/// observe one resolution. Construction stays cheap even for shapes that
/// reference themselves, because each level of the recursion is only built
/// when an input actually reaches it.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema, RecursiveSchema};
/// use serde_json::json;
///
/// fn comment() -> RecursiveSchema {
///     Assay::recursive(|| {
///         Box::new(
///             Assay::object()
///                 .entry("text", Assay::string())
///                 .entry("replies", Assay::optional(Assay::array(comment()))),
///         )
///     })
/// }
///
/// let input = json!({ "text": "top", "replies": [{ "text": "nested", "replies": null }] });
/// assert!(comment().parse(&input, &ParseInfo::new()).is_success());
/// ```
pub struct RecursiveSchema {
    init: Box<dyn Fn() -> Box<dyn ValueSchema> + Send + Sync>,
    resolved: RwLock<Option<Arc<dyn ValueSchema>>>,
}

impl RecursiveSchema {
    /// Creates a recursive schema from a thunk producing the inner schema.
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Box<dyn ValueSchema> + Send + Sync + 'static,
    {
        Self {
            init: Box::new(init),
            resolved: RwLock::new(None),
        }
    }

    fn inner(&self) -> Arc<dyn ValueSchema> {
        if let Some(inner) = self.resolved.read().as_ref() {
            return Arc::clone(inner);
        }

        let mut slot = self.resolved.write();
        if let Some(inner) = slot.as_ref() {
            return Arc::clone(inner);
        }

        tracing::trace!("resolving recursive schema");
        let inner: Arc<dyn ValueSchema> = Arc::from((self.init)());
        *slot = Some(Arc::clone(&inner));
        inner
    }
}

impl Schema for RecursiveSchema {
    type Output = Value;

    fn kind(&self) -> &'static str {
        "recursive"
    }

    fn reason(&self) -> Reason {
        Reason::Any
    }

    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.inner().parse_value(input, info)
    }

    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse(input, info)
    }
}
