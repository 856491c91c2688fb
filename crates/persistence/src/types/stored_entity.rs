//! Stored entity wrapper.
//!
//! [`StoredEntity`] wraps an entity with the metadata the HTTP layer needs for
//! caching headers: a monotonically increasing version and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// An entity with persistence metadata.
///
/// # Examples
///
/// ```
/// use courselib_persistence::types::{Course, StoredEntity};
/// use uuid::Uuid;
///
/// let course = Course {
///     id: Uuid::new_v4(),
///     title: "Commandeering a Ship Without Getting Caught".to_string(),
///     description: None,
///     author_id: Uuid::new_v4(),
/// };
/// let stored = StoredEntity::new(course);
///
/// assert_eq!(stored.version(), 1);
/// assert_eq!(stored.etag(), "W/\"1\"");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntity<T> {
    /// The entity itself.
    value: T,

    /// The version (starts at 1, incremented on every update).
    version: u64,

    /// When the entity was first stored.
    created_at: DateTime<Utc>,

    /// When the entity was last modified.
    last_modified: DateTime<Utc>,
}

impl<T: Entity> StoredEntity<T> {
    /// Wraps a freshly created entity as version 1.
    pub fn new(value: T) -> Self {
        let now = Utc::now();
        Self {
            value,
            version: 1,
            created_at: now,
            last_modified: now,
        }
    }

    /// Returns the entity's identifier.
    pub fn id(&self) -> Uuid {
        self.value.id()
    }

    /// Returns the wrapped entity.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes self and returns the entity.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns the version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns when the entity was first stored.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the entity was last modified.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Returns the weak ETag for this version.
    pub fn etag(&self) -> String {
        format!("W/\"{}\"", self.version)
    }

    /// Checks an `If-Match` / `If-None-Match` value against this version.
    ///
    /// `*` matches any version. Weak and strong forms compare equal.
    pub fn matches_etag(&self, etag: &str) -> bool {
        etag.split(',').map(str::trim).any(|candidate| {
            candidate == "*"
                || candidate.trim_start_matches("W/").trim_matches('"')
                    == self.version.to_string()
        })
    }

    /// Creates the next version of this entity with new content.
    ///
    /// The identifier of the new content is kept as given; callers are
    /// expected to preserve it.
    pub fn new_version(self, value: T) -> Self {
        Self {
            value,
            version: self.version + 1,
            created_at: self.created_at,
            last_modified: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Course;

    fn course(title: &str) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            author_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_new_starts_at_version_one() {
        let stored = StoredEntity::new(course("Basics"));
        assert_eq!(stored.version(), 1);
        assert_eq!(stored.created_at(), stored.last_modified());
    }

    #[test]
    fn test_new_version_increments() {
        let original = course("Basics");
        let id = original.id;
        let stored = StoredEntity::new(original);

        let mut changed = stored.value().clone();
        changed.title = "Advanced".to_string();
        let next = stored.new_version(changed);

        assert_eq!(next.version(), 2);
        assert_eq!(next.id(), id);
        assert_eq!(next.value().title, "Advanced");
        assert_eq!(next.etag(), "W/\"2\"");
    }

    #[test]
    fn test_matches_etag() {
        let stored = StoredEntity::new(course("Basics"));
        assert!(stored.matches_etag("W/\"1\""));
        assert!(stored.matches_etag("\"1\""));
        assert!(stored.matches_etag("*"));
        assert!(stored.matches_etag("W/\"5\", W/\"1\""));
        assert!(!stored.matches_etag("W/\"2\""));
    }
}
