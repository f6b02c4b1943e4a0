//! Async schemas and the async pipe engine.
//!
//! This module is the asynchronous rendition of the core: the same parsing
//! algorithm, abort semantics, and issue model, with latent results. Within
//! one composite, children are scheduled concurrently and the output is
//! assembled in input order; pipe actions stay strictly sequential. Under
//! abort-early the first failing child wins the join and sibling results
//! are discarded.
//!
//! Sync and async schemas never mix implicitly: adapt a sync schema with
//! [`IntoAsync::into_async`] to use it as an async child.
//!
//! # Feature Flag
//!
//! Available when the `effect` feature is enabled (default).
//!
//! # Example
//!
//! ```rust
//! use assay::effect::{AsyncAssay, AsyncSchema, IntoAsync};
//! use assay::{Assay, ParseInfo};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let schema = AsyncAssay::object()
//!     .entry("name", Assay::string().min_len(1).into_async())
//!     .entry("age", Assay::number().min(0.0).into_async());
//!
//! let result = schema
//!     .parse(&json!({ "name": "Ada", "age": 30 }), &ParseInfo::new())
//!     .await;
//! assert!(result.is_success());
//! # }
//! ```

mod array;
mod map;
mod object;
pub mod pipe;
mod record;
mod set;
mod traits;
mod tuple;
mod union;
mod wrappers;

pub use array::AsyncArraySchema;
pub use map::AsyncMapSchema;
pub use object::AsyncObjectSchema;
pub use pipe::{lift, run_async, AsyncAction, AsyncPipe};
pub use record::AsyncRecordSchema;
pub use set::AsyncSetSchema;
pub use traits::{AsyncSchema, AsyncValueSchema, IntoAsync, Ready};
pub use tuple::AsyncTupleSchema;
pub use union::AsyncUnionSchema;
pub use wrappers::AsyncWrapperSchema;

use crate::schema::WrapperKind;

/// Entry point for creating async composite schemas.
///
/// Leaves come from the sync factory plus [`IntoAsync::into_async`]; the
/// composites here exist for children that genuinely suspend.
pub struct AsyncAssay;

impl AsyncAssay {
    /// Creates an async object schema with no declared entries.
    pub fn object() -> AsyncObjectSchema {
        AsyncObjectSchema::new()
    }

    /// Creates an async open-mapping schema.
    pub fn record<K, V>(key: K, value: V) -> AsyncRecordSchema
    where
        K: AsyncSchema + 'static,
        V: AsyncSchema + 'static,
    {
        AsyncRecordSchema::new(key, value)
    }

    /// Creates an async homogeneous array schema.
    pub fn array<S: AsyncSchema + 'static>(item: S) -> AsyncArraySchema {
        AsyncArraySchema::new(item)
    }

    /// Creates an async tuple schema from its declared item schemas.
    pub fn tuple(items: Vec<Box<dyn AsyncValueSchema>>) -> AsyncTupleSchema {
        AsyncTupleSchema::new(items)
    }

    /// Creates an async map schema over entries-form input.
    pub fn map<K, V>(key: K, value: V) -> AsyncMapSchema
    where
        K: AsyncSchema + 'static,
        V: AsyncSchema + 'static,
    {
        AsyncMapSchema::new(key, value)
    }

    /// Creates an async set schema.
    pub fn set<S: AsyncSchema + 'static>(value: S) -> AsyncSetSchema {
        AsyncSetSchema::new(value)
    }

    /// Creates an async first-match union.
    pub fn union(options: Vec<Box<dyn AsyncValueSchema>>) -> AsyncUnionSchema {
        AsyncUnionSchema::new(options)
    }

    /// Wraps an async schema to also accept `null`.
    pub fn nullable<S: AsyncSchema + 'static>(wrapped: S) -> AsyncWrapperSchema {
        AsyncWrapperSchema::new(WrapperKind::Nullable, wrapped)
    }

    /// Wraps an async schema to also accept an absent value.
    pub fn optional<S: AsyncSchema + 'static>(wrapped: S) -> AsyncWrapperSchema {
        AsyncWrapperSchema::new(WrapperKind::Optional, wrapped)
    }

    /// Wraps an async schema to also accept both sentinel readings.
    pub fn nullish<S: AsyncSchema + 'static>(wrapped: S) -> AsyncWrapperSchema {
        AsyncWrapperSchema::new(WrapperKind::Nullish, wrapped)
    }

    /// Wraps an async schema to reject `null` before deferring.
    pub fn non_nullable<S: AsyncSchema + 'static>(wrapped: S) -> AsyncWrapperSchema {
        AsyncWrapperSchema::new(WrapperKind::NonNullable, wrapped)
    }

    /// Wraps an async schema to reject an absent value before deferring.
    pub fn non_optional<S: AsyncSchema + 'static>(wrapped: S) -> AsyncWrapperSchema {
        AsyncWrapperSchema::new(WrapperKind::NonOptional, wrapped)
    }

    /// Wraps an async schema to reject both sentinel readings.
    pub fn non_nullish<S: AsyncSchema + 'static>(wrapped: S) -> AsyncWrapperSchema {
        AsyncWrapperSchema::new(WrapperKind::NonNullish, wrapped)
    }
}
