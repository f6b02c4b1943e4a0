//! Issue paths for locating values in nested inputs.
//!
//! This module provides [`IssuePath`] and [`PathItem`] for building and
//! representing the sequence of container descents from a root input to the
//! value an issue is about.

use std::fmt::{self, Display};

use serde_json::Value;

/// The container kind a path item descended through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// A declared key of an object input.
    ObjectKey,
    /// An index of an array input.
    ArrayIndex,
    /// An index of a tuple input (declared or rest position).
    TupleIndex,
    /// The key side of a map entry.
    MapKey,
    /// The value side of a map entry.
    MapValue,
    /// The key side of a record entry.
    RecordKey,
    /// The value side of a record entry.
    RecordValue,
    /// A position of a set input, tagged in iteration order.
    SetIndex,
}

/// The key or index under which a path item descended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    /// A string key (object and record entries).
    Key(String),
    /// A numeric position (array, tuple, set, and map entries).
    Index(usize),
}

impl Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Key(key) => write!(f, "{}", key),
            PathKey::Index(index) => write!(f, "{}", index),
        }
    }
}

/// One step of descent from a container into one of its children.
///
/// An item records the container kind, the container input it descended
/// from, the key or index it descended under, and the value found there.
/// The container input is a diagnostic aid: item equality considers only
/// kind, key, and value.
#[derive(Debug, Clone)]
pub struct PathItem {
    kind: PathKind,
    input: Value,
    key: PathKey,
    value: Value,
}

impl PathItem {
    /// Creates a path item from its parts.
    pub fn new(kind: PathKind, input: Value, key: PathKey, value: Value) -> Self {
        Self {
            kind,
            input,
            key,
            value,
        }
    }

    /// Descent into a declared object key. A missing key records `null`.
    pub fn object_key(input: &Value, key: &str, value: &Value) -> Self {
        Self::new(
            PathKind::ObjectKey,
            input.clone(),
            PathKey::Key(key.to_string()),
            value.clone(),
        )
    }

    /// Descent into an array index.
    pub fn array_index(input: &Value, index: usize, value: &Value) -> Self {
        Self::new(
            PathKind::ArrayIndex,
            input.clone(),
            PathKey::Index(index),
            value.clone(),
        )
    }

    /// Descent into a tuple index (declared or rest position).
    pub fn tuple_index(input: &Value, index: usize, value: &Value) -> Self {
        Self::new(
            PathKind::TupleIndex,
            input.clone(),
            PathKey::Index(index),
            value.clone(),
        )
    }

    /// Descent into the key side of a map entry. The recorded value is the
    /// key input itself.
    pub fn map_key(input: &Value, index: usize, key: &Value) -> Self {
        Self::new(
            PathKind::MapKey,
            input.clone(),
            PathKey::Index(index),
            key.clone(),
        )
    }

    /// Descent into the value side of a map entry.
    pub fn map_value(input: &Value, index: usize, value: &Value) -> Self {
        Self::new(
            PathKind::MapValue,
            input.clone(),
            PathKey::Index(index),
            value.clone(),
        )
    }

    /// Descent into the key side of a record entry. The recorded value is
    /// the key itself as a JSON string.
    pub fn record_key(input: &Value, key: &str) -> Self {
        Self::new(
            PathKind::RecordKey,
            input.clone(),
            PathKey::Key(key.to_string()),
            Value::String(key.to_string()),
        )
    }

    /// Descent into the value side of a record entry.
    pub fn record_value(input: &Value, key: &str, value: &Value) -> Self {
        Self::new(
            PathKind::RecordValue,
            input.clone(),
            PathKey::Key(key.to_string()),
            value.clone(),
        )
    }

    /// Descent into a set position, tagged in iteration order.
    pub fn set_index(input: &Value, index: usize, value: &Value) -> Self {
        Self::new(
            PathKind::SetIndex,
            input.clone(),
            PathKey::Index(index),
            value.clone(),
        )
    }

    /// Returns the container kind of this item.
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    /// Returns the container input this item descended from.
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// Returns the key or index this item descended under.
    pub fn key(&self) -> &PathKey {
        &self.key
    }

    /// Returns the value found at the key.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

// Identity excludes the container input.
impl PartialEq for PathItem {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.key == other.key && self.value == other.value
    }
}

impl Eq for PathItem {}

/// A path from a root input to a nested value.
///
/// Paths are built top-down as the parser descends; appending returns a new
/// path and leaves the original untouched, so sibling descents never observe
/// each other's segments.
///
/// # Example
///
/// ```rust
/// use assay::{IssuePath, PathItem};
/// use serde_json::json;
///
/// let users = json!([{ "email": "x" }]);
/// let path = IssuePath::root()
///     .push(PathItem::array_index(&users, 0, &users[0]))
///     .push(PathItem::object_key(&users[0], "email", &users[0]["email"]));
///
/// assert_eq!(path.to_string(), "[0].email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssuePath {
    items: Vec<PathItem>,
}

impl IssuePath {
    /// Creates an empty path representing the root input.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with one more item appended.
    pub fn push(&self, item: PathItem) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// Returns true if this is the root path (no items).
    pub fn is_root(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this path.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this path has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the path items, root-first.
    pub fn items(&self) -> impl Iterator<Item = &PathItem> {
        self.items.iter()
    }

    /// Returns the last item, or None at the root.
    pub fn last(&self) -> Option<&PathItem> {
        self.items.last()
    }

    /// Follows this path down from `root` and returns the value it lands
    /// on, or None when the path does not fit the input's shape.
    ///
    /// A missing object key resolves to `null`, matching how missing keys
    /// are materialized during parsing. Key-side items resolve to the key
    /// itself.
    pub fn locate(&self, root: &Value) -> Option<Value> {
        let mut current = root.clone();
        for item in &self.items {
            current = match (item.kind(), item.key()) {
                (PathKind::ObjectKey, PathKey::Key(key)) => current
                    .as_object()
                    .map(|obj| obj.get(key).cloned().unwrap_or(Value::Null))?,
                (PathKind::ArrayIndex, PathKey::Index(index))
                | (PathKind::TupleIndex, PathKey::Index(index))
                | (PathKind::SetIndex, PathKey::Index(index)) => {
                    current.as_array()?.get(*index)?.clone()
                }
                (PathKind::MapKey, PathKey::Index(index)) => {
                    current.as_array()?.get(*index)?.as_array()?.first()?.clone()
                }
                (PathKind::MapValue, PathKey::Index(index)) => {
                    current.as_array()?.get(*index)?.as_array()?.get(1)?.clone()
                }
                (PathKind::RecordKey, PathKey::Key(key)) => {
                    if current.as_object()?.contains_key(key) {
                        Value::String(key.clone())
                    } else {
                        return None;
                    }
                }
                (PathKind::RecordValue, PathKey::Key(key)) => {
                    current.as_object()?.get(key)?.clone()
                }
                _ => return None,
            };
        }
        Some(current)
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            match (item.kind(), item.key()) {
                (PathKind::ObjectKey | PathKind::RecordKey | PathKind::RecordValue, key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", key)?;
                }
                (PathKind::MapKey, key) => write!(f, "[{}].key", key)?,
                (PathKind::MapValue, key) => write!(f, "[{}].value", key)?,
                (_, key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}
