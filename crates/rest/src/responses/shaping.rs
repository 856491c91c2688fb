//! Field selection for the `fields` query parameter.
//!
//! A client can ask for a subset of a shape's fields with
//! `?fields=name,mainCategory`. Names are matched case-insensitively against
//! the shape's declared fields and the projected object always uses the
//! canonical spelling.
//!
//! ```
//! use courselib_rest::dto::{AuthorFullDto, ShapeId};
//! use courselib_rest::responses::shaping::{FieldSpec, has_fields, project};
//!
//! assert!(has_fields(ShapeId::Author, Some("Name, age")));
//! assert!(!has_fields(ShapeId::Author, Some("Name, Bogus")));
//! assert!(has_fields(ShapeId::Author, None));
//!
//! let spec = FieldSpec::parse(Some("FirstName")).unwrap();
//! assert_eq!(spec.names(), &["FirstName".to_string()]);
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::dto::{Shape, ShapeId};

/// Key under which links are attached to a projected object.
pub const LINKS_KEY: &str = "links";

/// Errors raised while parsing or applying a field specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldSpecError {
    /// The list contains an empty entry, such as `name,,age`.
    #[error("field list '{raw}' contains an empty entry")]
    EmptySegment {
        /// The raw list.
        raw: String,
    },

    /// A requested field is not declared on the shape.
    #[error("field '{field}' does not exist on {shape}")]
    UnknownField {
        /// The requested name, as given.
        field: String,
        /// The shape's name.
        shape: &'static str,
    },
}

/// An ordered list of requested field names.
///
/// An empty spec selects every declared field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec {
    names: Vec<String>,
}

impl FieldSpec {
    /// Selects every declared field.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses a comma-separated field list.
    ///
    /// `None`, `""` and whitespace-only input select every field. Entries are
    /// trimmed; duplicates (compared case-insensitively) keep their first
    /// position.
    pub fn parse(raw: Option<&str>) -> Result<Self, FieldSpecError> {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(Self::all());
        };

        let mut names: Vec<String> = Vec::new();
        for segment in raw.split(',') {
            let name = segment.trim();
            if name.is_empty() {
                return Err(FieldSpecError::EmptySegment {
                    raw: raw.to_string(),
                });
            }
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        }

        Ok(Self { names })
    }

    /// Returns true if every field is selected.
    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the requested names as given.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves the spec against a shape, returning canonical names in order.
    pub fn resolve(&self, shape: ShapeId) -> Result<Vec<&'static str>, FieldSpecError> {
        if self.is_all() {
            return Ok(shape.fields().to_vec());
        }

        self.names
            .iter()
            .map(|name| {
                shape
                    .canonical_field(name)
                    .ok_or_else(|| FieldSpecError::UnknownField {
                        field: name.clone(),
                        shape: shape.name(),
                    })
            })
            .collect()
    }
}

/// Returns true if every requested field exists on the shape.
///
/// A malformed list is never valid.
pub fn has_fields(shape: ShapeId, raw: Option<&str>) -> bool {
    FieldSpec::parse(raw)
        .and_then(|spec| spec.resolve(shape))
        .is_ok()
}

/// Projects a shaped value down to the selected fields.
pub fn project<T: Shape + ?Sized>(
    object: &T,
    spec: &FieldSpec,
) -> Result<ShapedObject, FieldSpecError> {
    let fields = spec.resolve(object.shape_id())?;

    let mut shaped = ShapedObject::with_capacity(fields.len());
    for field in fields {
        // Declared fields always have a value.
        let value = object.field_value(field).unwrap_or(Value::Null);
        shaped.insert(field, value);
    }
    Ok(shaped)
}

/// An ordered key/value object.
///
/// Serializes as a JSON object with keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedObject {
    entries: Vec<(String, Value)>,
}

impl ShapedObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts or replaces a key, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ShapedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
