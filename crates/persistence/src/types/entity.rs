//! Domain entities owned by the repository.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entities the repository knows how to store.
pub trait Entity: Clone + Send + Sync {
    /// Name used in error messages and logs (e.g., "Author").
    const ENTITY_TYPE: &'static str;

    /// Returns the entity's identifier.
    fn id(&self) -> Uuid;
}

/// An author of courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, with the offset it was recorded in.
    pub date_of_birth: DateTime<FixedOffset>,
    /// Date of death, if any.
    pub date_of_death: Option<DateTime<FixedOffset>>,
    /// The category the author mainly writes about.
    pub main_category: String,
}

impl Entity for Author {
    const ENTITY_TYPE: &'static str = "Author";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// A course written by an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// The owning author.
    pub author_id: Uuid,
}

impl Entity for Course {
    const ENTITY_TYPE: &'static str = "Course";

    fn id(&self) -> Uuid {
        self.id
    }
}
