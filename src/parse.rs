//! The one-shot parsing surface.
//!
//! Thin adapters over the schema contracts: the `parse` forms convert a
//! failing result into a raised [`ParseError`]; the `safe_parse` forms
//! return the success-or-issues union untouched. The `_with` variants
//! accept an explicit [`ParseInfo`] for the abort flags.

use serde_json::Value;
use stillwater::Validation;

use crate::error::ParseError;
use crate::info::ParseInfo;
use crate::schema::Schema;
use crate::Parsed;

/// Parses an input, raising a [`ParseError`] on validation failure.
pub fn parse<S: Schema>(schema: &S, input: &Value) -> Result<S::Output, ParseError> {
    parse_with(schema, input, &ParseInfo::new())
}

/// Parses an input with explicit options, raising on failure.
pub fn parse_with<S: Schema>(
    schema: &S,
    input: &Value,
    info: &ParseInfo,
) -> Result<S::Output, ParseError> {
    tracing::trace!(kind = schema.kind(), "parse");
    match schema.parse(input, info) {
        Validation::Success(output) => Ok(output),
        Validation::Failure(issues) => Err(ParseError::new(issues)),
    }
}

/// Parses an input, returning the success-or-issues union directly.
pub fn safe_parse<S: Schema>(schema: &S, input: &Value) -> Parsed<S::Output> {
    safe_parse_with(schema, input, &ParseInfo::new())
}

/// Parses an input with explicit options, never raising for validation
/// failures.
pub fn safe_parse_with<S: Schema>(schema: &S, input: &Value, info: &ParseInfo) -> Parsed<S::Output> {
    tracing::trace!(kind = schema.kind(), "safe_parse");
    schema.parse(input, info)
}

#[cfg(feature = "effect")]
mod latent {
    use super::*;
    use crate::effect::AsyncSchema;

    /// Async analogue of [`parse`].
    pub async fn parse_async<S: AsyncSchema>(
        schema: &S,
        input: &Value,
    ) -> Result<S::Output, ParseError> {
        parse_async_with(schema, input, &ParseInfo::new()).await
    }

    /// Async analogue of [`parse_with`].
    pub async fn parse_async_with<S: AsyncSchema>(
        schema: &S,
        input: &Value,
        info: &ParseInfo,
    ) -> Result<S::Output, ParseError> {
        tracing::trace!(kind = schema.kind(), "parse_async");
        match schema.parse(input, info).await {
            Validation::Success(output) => Ok(output),
            Validation::Failure(issues) => Err(ParseError::new(issues)),
        }
    }

    /// Async analogue of [`safe_parse`].
    pub async fn safe_parse_async<S: AsyncSchema>(schema: &S, input: &Value) -> Parsed<S::Output> {
        safe_parse_async_with(schema, input, &ParseInfo::new()).await
    }

    /// Async analogue of [`safe_parse_with`].
    pub async fn safe_parse_async_with<S: AsyncSchema>(
        schema: &S,
        input: &Value,
        info: &ParseInfo,
    ) -> Parsed<S::Output> {
        tracing::trace!(kind = schema.kind(), "safe_parse_async");
        schema.parse(input, info).await
    }
}

#[cfg(feature = "effect")]
pub use latent::{parse_async, parse_async_with, safe_parse_async, safe_parse_async_with};
