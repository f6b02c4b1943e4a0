//! Schema kinds and the factory entry point.
//!
//! Every schema implements the [`Schema`] contract: a type gate against the
//! JSON value universe, recursion into children for compound inputs, and a
//! pipe over the reconstructed output. Schemas are immutable once built and
//! freely shareable; every parse produces fresh output containers.
//!
//! # Example
//!
//! ```rust
//! use assay::{Assay, ParseInfo, Schema};
//! use serde_json::json;
//!
//! let schema = Assay::object()
//!     .entry("name", Assay::string().min_len(1))
//!     .entry("age", Assay::number().min(0.0));
//!
//! let result = schema.parse(&json!({ "name": "Ada", "age": 30 }), &ParseInfo::new());
//! assert!(result.is_success());
//! ```

mod array;
mod boolean;
mod literal;
mod map;
mod number;
mod object;
mod record;
mod recursive;
mod set;
mod string;
mod traits;
mod tuple;
mod union;
mod wrappers;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use literal::LiteralSchema;
pub use map::MapSchema;
pub use number::NumberSchema;
pub use object::ObjectSchema;
pub use record::RecordSchema;
pub use recursive::RecursiveSchema;
pub use set::SetSchema;
pub use string::StringSchema;
pub use traits::{Schema, ValueSchema};
pub use tuple::TupleSchema;
pub use union::UnionSchema;
pub use wrappers::{DefaultValue, WrapperKind, WrapperSchema};

use serde_json::Value;

/// Entry point for creating schemas.
///
/// Each method returns a schema kind whose builder methods add pipe actions
/// or structural configuration.
pub struct Assay;

impl Assay {
    /// Creates a string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a number schema (any JSON number, as `f64`).
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a schema accepting exactly the given value.
    pub fn literal(value: impl Into<Value>) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    /// Creates an object schema with no declared entries.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates an open-mapping schema with a key and a value schema.
    pub fn record<K, V>(key: K, value: V) -> RecordSchema
    where
        K: Schema + 'static,
        V: Schema + 'static,
    {
        RecordSchema::new(key, value)
    }

    /// Creates a homogeneous array schema.
    pub fn array<S: Schema>(item: S) -> ArraySchema<S> {
        ArraySchema::new(item)
    }

    /// Creates a tuple schema from its declared item schemas.
    pub fn tuple(items: Vec<Box<dyn ValueSchema>>) -> TupleSchema {
        TupleSchema::new(items)
    }

    /// Creates a map schema over entries-form input (`[[key, value], ...]`).
    pub fn map<K, V>(key: K, value: V) -> MapSchema
    where
        K: Schema + 'static,
        V: Schema + 'static,
    {
        MapSchema::new(key, value)
    }

    /// Creates a set schema (array input, deduplicated output).
    pub fn set<S: Schema>(value: S) -> SetSchema<S> {
        SetSchema::new(value)
    }

    /// Creates a first-match union over ordered alternatives.
    pub fn union(options: Vec<Box<dyn ValueSchema>>) -> UnionSchema {
        UnionSchema::new(options)
    }

    /// Wraps a schema to also accept `null`.
    pub fn nullable<S: Schema + 'static>(wrapped: S) -> WrapperSchema {
        WrapperSchema::new(WrapperKind::Nullable, wrapped)
    }

    /// Wraps a schema to also accept an absent value.
    pub fn optional<S: Schema + 'static>(wrapped: S) -> WrapperSchema {
        WrapperSchema::new(WrapperKind::Optional, wrapped)
    }

    /// Wraps a schema to also accept `null` or an absent value.
    pub fn nullish<S: Schema + 'static>(wrapped: S) -> WrapperSchema {
        WrapperSchema::new(WrapperKind::Nullish, wrapped)
    }

    /// Wraps a schema to reject `null` before deferring.
    pub fn non_nullable<S: Schema + 'static>(wrapped: S) -> WrapperSchema {
        WrapperSchema::new(WrapperKind::NonNullable, wrapped)
    }

    /// Wraps a schema to reject an absent value before deferring.
    pub fn non_optional<S: Schema + 'static>(wrapped: S) -> WrapperSchema {
        WrapperSchema::new(WrapperKind::NonOptional, wrapped)
    }

    /// Wraps a schema to reject both sentinel readings.
    pub fn non_nullish<S: Schema + 'static>(wrapped: S) -> WrapperSchema {
        WrapperSchema::new(WrapperKind::NonNullish, wrapped)
    }

    /// Creates a lazy recursive schema from a thunk.
    pub fn recursive<F>(init: F) -> RecursiveSchema
    where
        F: Fn() -> Box<dyn ValueSchema> + Send + Sync + 'static,
    {
        RecursiveSchema::new(init)
    }
}
