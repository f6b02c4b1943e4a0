//! The synchronous schema contract.
//!
//! [`Schema`] is the typed contract every schema kind implements;
//! [`ValueSchema`] is its type-erased form, used wherever heterogeneous
//! children are stored (object entries, tuple items, union options). A
//! blanket impl bridges the two, so any schema can be boxed as a child.

use serde_json::Value;

use crate::error::Reason;
use crate::info::ParseInfo;
use crate::Parsed;

/// A schema: a declarative description of an accepted input shape paired
/// with a parse procedure.
///
/// Parsing is pure: it never mutates the input or the schema, and repeated
/// calls with equal arguments produce equal results. A successful parse
/// returns a freshly constructed output; it never aliases the input's
/// containers.
///
/// # Example
///
/// ```rust
/// use assay::{Assay, ParseInfo, Schema};
/// use serde_json::json;
///
/// let schema = Assay::string().min_len(1);
/// let result = schema.parse(&json!("hello"), &ParseInfo::new());
/// assert!(result.is_success());
/// ```
pub trait Schema: Send + Sync {
    /// The output type produced by a successful parse.
    type Output;

    /// The stable kind tag (`"string"`, `"object"`, `"union"`, ...).
    fn kind(&self) -> &'static str;

    /// The reason family carried by this schema's pipe issues.
    fn reason(&self) -> Reason;

    /// Parses an input against this schema.
    fn parse(&self, input: &Value, info: &ParseInfo) -> Parsed<Self::Output>;

    /// Parses an input and returns the output as a `serde_json::Value`.
    ///
    /// This lets schemas with different output types be stored uniformly as
    /// children of composite schemas.
    fn parse_to_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value>;
}

/// A type-erased schema that parses to a JSON value.
///
/// Composite schemas store their children as `Box<dyn ValueSchema>`. Every
/// [`Schema`] implements this automatically.
pub trait ValueSchema: Send + Sync {
    /// The stable kind tag of the underlying schema.
    fn kind(&self) -> &'static str;

    /// The reason family of the underlying schema.
    fn reason(&self) -> Reason;

    /// Parses an input, returning the output as a `serde_json::Value`.
    fn parse_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value>;
}

impl<S: Schema> ValueSchema for S {
    fn kind(&self) -> &'static str {
        Schema::kind(self)
    }

    fn reason(&self) -> Reason {
        Schema::reason(self)
    }

    fn parse_value(&self, input: &Value, info: &ParseInfo) -> Parsed<Value> {
        self.parse_to_value(input, info)
    }
}
