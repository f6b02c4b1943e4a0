//! # Assay
//!
//! A schema-based parser, validator, and transformer. A schema type-checks
//! an unknown JSON value, walks its children, and either reconstructs a
//! fresh typed output or accumulates every validation issue, each with a
//! navigable path from the root input to the offending leaf.
//!
//! ## Overview
//!
//! Every schema follows the same shape: a type gate against the value
//! universe, recursion into children for compound inputs, and a pipe of
//! post-type-check actions over the reconstructed output. Failures never
//! propagate as panics; they accumulate into a non-empty [`Issues`]
//! collection via stillwater's `Validation` type, or, under the
//! abort-early option, the first failure returns immediately.
//!
//! ## Core Types
//!
//! - [`Assay`]: the factory for every schema kind
//! - [`Parsed`]: the result of a parse, success or non-empty issues
//! - [`Issue`] / [`Issues`]: one failure with path and cause; the
//!   accumulating collection
//! - [`IssuePath`] / [`PathItem`]: the descent from root input to a leaf
//! - [`ParseInfo`]: abort flags and descent state threaded through a parse
//! - [`pipe::Pipe`]: ordered validators and transformers after the gate
//!
//! ## Example
//!
//! ```rust
//! use assay::{parse, safe_parse, Assay};
//! use serde_json::json;
//!
//! let schema = Assay::object()
//!     .entry("name", Assay::string().min_len(1))
//!     .entry("age", Assay::number().min(0.0));
//!
//! // Unknown keys are dropped; entries parse through their schemas.
//! let output = parse(&schema, &json!({ "name": "Ada", "age": 30, "x": 1 })).unwrap();
//! assert_eq!(output.len(), 2);
//!
//! // Failures carry a path per issue.
//! let result = safe_parse(&schema, &json!({ "name": 42, "age": -1 }));
//! let issues = result.into_result().unwrap_err();
//! assert_eq!(issues.len(), 2);
//! ```

pub mod error;
pub mod info;
pub mod path;
pub mod pipe;
pub mod schema;

#[cfg(feature = "effect")]
pub mod effect;

mod parse;

pub use error::{Issue, Issues, Origin, ParseError, Reason};
pub use info::{ParseInfo, ValidateInfo};
pub use parse::{parse, parse_with, safe_parse, safe_parse_with};
pub use path::{IssuePath, PathItem, PathKey, PathKind};
pub use schema::{
    ArraySchema, Assay, BooleanSchema, DefaultValue, LiteralSchema, MapSchema, NumberSchema,
    ObjectSchema, RecordSchema, RecursiveSchema, Schema, SetSchema, StringSchema, TupleSchema,
    UnionSchema, ValueSchema, WrapperKind, WrapperSchema,
};

#[cfg(feature = "effect")]
pub use parse::{parse_async, parse_async_with, safe_parse_async, safe_parse_async_with};

/// The result of a parse: a typed output or a non-empty issue collection.
pub type Parsed<T> = stillwater::Validation<T, Issues>;

/// Wraps a successful output.
pub fn ok<T>(output: T) -> Parsed<T> {
    stillwater::Validation::Success(output)
}

/// Wraps a failing issue collection.
pub fn err<T>(issues: Issues) -> Parsed<T> {
    stillwater::Validation::Failure(issues)
}
