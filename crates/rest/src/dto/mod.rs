//! Data transfer objects and the static shape registry.
//!
//! Every response body is built from a *shape*: a DTO with a fixed, ordered
//! list of wire fields. [`ShapeId`] is the registry of those field lists and
//! [`Shape`] is implemented by each DTO so the field selector can read values
//! by name without reflection.
//!
//! | Shape | Fields |
//! |-------|--------|
//! | [`ShapeId::Author`] | `id`, `name`, `age`, `mainCategory` |
//! | [`ShapeId::AuthorFull`] | `id`, `firstName`, `lastName`, `dateOfBirth`, `mainCategory` |
//! | [`ShapeId::Course`] | `id`, `title`, `description`, `authorId` |

mod author;
mod course;
pub mod validation;

pub use author::{
    AuthorDto, AuthorFullDto, AuthorRepresentation, AuthorShape, CreateAuthorDto,
    CreateAuthorWithDateOfDeathDto, age_at, map_author,
};
pub use course::{CourseDto, CreateCourseDto, UpdateCourseDto};

use serde_json::Value;

/// Identifies a transfer shape and its declared fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    /// Friendly author: display name and computed age.
    Author,
    /// Full author: the entity's own name and date fields.
    AuthorFull,
    /// A course.
    Course,
}

const AUTHOR_FIELDS: &[&str] = &["id", "name", "age", "mainCategory"];
const AUTHOR_FULL_FIELDS: &[&str] = &["id", "firstName", "lastName", "dateOfBirth", "mainCategory"];
const COURSE_FIELDS: &[&str] = &["id", "title", "description", "authorId"];

impl ShapeId {
    /// Returns the declared wire fields in declaration order.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            ShapeId::Author => AUTHOR_FIELDS,
            ShapeId::AuthorFull => AUTHOR_FULL_FIELDS,
            ShapeId::Course => COURSE_FIELDS,
        }
    }

    /// Returns the shape's name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ShapeId::Author => "Author",
            ShapeId::AuthorFull => "AuthorFull",
            ShapeId::Course => "Course",
        }
    }

    /// Looks up a field case-insensitively and returns its canonical spelling.
    pub fn canonical_field(self, name: &str) -> Option<&'static str> {
        self.fields()
            .iter()
            .copied()
            .find(|field| field.eq_ignore_ascii_case(name))
    }

    /// Returns true if the shape declares the field (case-insensitive).
    pub fn has_field(self, name: &str) -> bool {
        self.canonical_field(name).is_some()
    }
}

/// A DTO whose fields can be read by canonical wire name.
pub trait Shape {
    /// Returns the shape this value belongs to.
    fn shape_id(&self) -> ShapeId;

    /// Returns the value of a declared field, or `None` for an undeclared one.
    fn field_value(&self, field: &str) -> Option<Value>;
}
