//! Author transfer objects.

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use courselib_persistence::types::{Author, Course};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::course::CreateCourseDto;
use super::{Shape, ShapeId};

/// Computes an age in whole years between two instants.
///
/// A birthday that has not yet come round in the year of `until` does not count.
///
/// ```
/// use chrono::DateTime;
/// use courselib_rest::dto::age_at;
///
/// let born = DateTime::parse_from_rfc3339("1650-07-23T00:00:00+00:00").unwrap();
/// let day_before = DateTime::parse_from_rfc3339("1700-07-22T00:00:00+00:00").unwrap();
/// assert_eq!(age_at(born, day_before), 49);
/// ```
pub fn age_at(born: DateTime<FixedOffset>, until: DateTime<FixedOffset>) -> i32 {
    let born = born.date_naive();
    let until = until.date_naive();

    let mut age = until.year() - born.year();
    if (until.month(), until.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    age
}

/// Friendly author shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    /// Identifier.
    pub id: Uuid,
    /// First and last name joined by a space.
    pub name: String,
    /// Age at death, or today if still alive.
    pub age: i32,
    /// Main category.
    pub main_category: String,
}

impl AuthorDto {
    /// Maps an author, computing the age as of `now` unless a date of death is known.
    pub fn from_author_at(author: &Author, now: DateTime<FixedOffset>) -> Self {
        let until = author.date_of_death.unwrap_or(now);
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: age_at(author.date_of_birth, until),
            main_category: author.main_category.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author_at(author, Utc::now().fixed_offset())
    }
}

impl Shape for AuthorDto {
    fn shape_id(&self) -> ShapeId {
        ShapeId::Author
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::String(self.id.to_string())),
            "name" => Some(Value::String(self.name.clone())),
            "age" => Some(Value::from(self.age)),
            "mainCategory" => Some(Value::String(self.main_category.clone())),
            _ => None,
        }
    }
}

/// Full author shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFullDto {
    /// Identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: DateTime<FixedOffset>,
    /// Main category.
    pub main_category: String,
}

impl From<&Author> for AuthorFullDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            date_of_birth: author.date_of_birth,
            main_category: author.main_category.clone(),
        }
    }
}

impl Shape for AuthorFullDto {
    fn shape_id(&self) -> ShapeId {
        ShapeId::AuthorFull
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::String(self.id.to_string())),
            "firstName" => Some(Value::String(self.first_name.clone())),
            "lastName" => Some(Value::String(self.last_name.clone())),
            // Same encoding as the derived Serialize.
            "dateOfBirth" => serde_json::to_value(self.date_of_birth).ok(),
            "mainCategory" => Some(Value::String(self.main_category.clone())),
            _ => None,
        }
    }
}

/// The author shapes a client can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthorShape {
    /// [`AuthorDto`].
    #[default]
    Friendly,
    /// [`AuthorFullDto`].
    Full,
}

impl AuthorShape {
    /// Returns the registry entry for this shape.
    pub fn shape_id(self) -> ShapeId {
        match self {
            AuthorShape::Friendly => ShapeId::Author,
            AuthorShape::Full => ShapeId::AuthorFull,
        }
    }
}

/// An author mapped to one of its shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorRepresentation {
    /// Friendly shape.
    Friendly(AuthorDto),
    /// Full shape.
    Full(AuthorFullDto),
}

impl Shape for AuthorRepresentation {
    fn shape_id(&self) -> ShapeId {
        match self {
            AuthorRepresentation::Friendly(dto) => dto.shape_id(),
            AuthorRepresentation::Full(dto) => dto.shape_id(),
        }
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        match self {
            AuthorRepresentation::Friendly(dto) => dto.field_value(field),
            AuthorRepresentation::Full(dto) => dto.field_value(field),
        }
    }
}

/// Maps an author entity to the requested shape.
pub fn map_author(author: &Author, shape: AuthorShape) -> AuthorRepresentation {
    match shape {
        AuthorShape::Friendly => AuthorRepresentation::Friendly(AuthorDto::from(author)),
        AuthorShape::Full => AuthorRepresentation::Full(AuthorFullDto::from(author)),
    }
}

/// Request body for creating an author, optionally with courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorDto {
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: DateTime<FixedOffset>,
    /// Main category.
    #[serde(default)]
    pub main_category: String,
    /// Courses created together with the author.
    #[serde(default)]
    pub courses: Vec<CreateCourseDto>,
}

impl From<CreateAuthorDto> for (Author, Vec<Course>) {
    fn from(dto: CreateAuthorDto) -> Self {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: dto.first_name,
            last_name: dto.last_name,
            date_of_birth: dto.date_of_birth,
            date_of_death: None,
            main_category: dto.main_category,
        };
        let courses = dto
            .courses
            .into_iter()
            .map(|course| course.into_course(author.id))
            .collect();
        (author, courses)
    }
}

/// Request body for creating an author who has died.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorWithDateOfDeathDto {
    /// The common author fields.
    #[serde(flatten)]
    pub author: CreateAuthorDto,
    /// Date of death.
    #[serde(default)]
    pub date_of_death: Option<DateTime<FixedOffset>>,
}

impl From<CreateAuthorWithDateOfDeathDto> for (Author, Vec<Course>) {
    fn from(dto: CreateAuthorWithDateOfDeathDto) -> Self {
        let (mut author, courses): (Author, Vec<Course>) = dto.author.into();
        author.date_of_death = dto.date_of_death;
        (author, courses)
    }
}
