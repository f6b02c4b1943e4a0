//! The asynchronous schema contract.
//!
//! [`AsyncSchema`] mirrors [`Schema`](crate::Schema) with latent results.
//! The two worlds never mix implicitly: async composites only accept async
//! children, and a sync schema enters through the explicit [`Ready`]
//! adapter (or the [`IntoAsync`] extension), whose future resolves
//! immediately.

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use crate::error::Reason;
use crate::info::ParseInfo;
use crate::schema::Schema;
use crate::Parsed;

/// A schema whose parse returns a latent result.
///
/// The scheduling model is cooperative: suspension points occur only at
/// child-schema and pipe-action boundaries. Parsing remains pure; a shared
/// instance may be parsed from multiple tasks at once.
pub trait AsyncSchema: Send + Sync {
    /// The output type produced by a successful parse.
    type Output;

    /// The stable kind tag of this schema.
    fn kind(&self) -> &'static str;

    /// The reason family carried by this schema's pipe issues.
    fn reason(&self) -> Reason;

    /// Parses an input against this schema.
    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Self::Output>>;

    /// Parses an input and returns the output as a `serde_json::Value`.
    fn parse_to_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>>;
}

/// A type-erased async schema that parses to a JSON value.
pub trait AsyncValueSchema: Send + Sync {
    /// The stable kind tag of the underlying schema.
    fn kind(&self) -> &'static str;

    /// The reason family of the underlying schema.
    fn reason(&self) -> Reason;

    /// Parses an input, returning the output as a `serde_json::Value`.
    fn parse_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>>;
}

impl<S: AsyncSchema> AsyncValueSchema for S {
    fn kind(&self) -> &'static str {
        AsyncSchema::kind(self)
    }

    fn reason(&self) -> Reason {
        AsyncSchema::reason(self)
    }

    fn parse_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        self.parse_to_value(input, info)
    }
}

/// Adapter lifting a sync schema into the async world.
///
/// Its parse completes without suspension, so sync leaves compose freely
/// inside async composites.
pub struct Ready<S>(pub S);

impl<S: Schema> AsyncSchema for Ready<S>
where
    S::Output: Send,
{
    type Output = S::Output;

    fn kind(&self) -> &'static str {
        self.0.kind()
    }

    fn reason(&self) -> Reason {
        self.0.reason()
    }

    fn parse<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Self::Output>> {
        future::ready(self.0.parse(input, info)).boxed()
    }

    fn parse_to_value<'a>(
        &'a self,
        input: &'a Value,
        info: &'a ParseInfo,
    ) -> BoxFuture<'a, Parsed<Value>> {
        future::ready(self.0.parse_to_value(input, info)).boxed()
    }
}

/// Extension adapting any sync schema via `.into_async()`.
pub trait IntoAsync: Schema + Sized {
    fn into_async(self) -> Ready<Self> {
        Ready(self)
    }
}

impl<S: Schema + Sized> IntoAsync for S {}
