//! In-memory backend.
//!
//! Keeps authors and courses in insertion order behind a single
//! [`parking_lot::RwLock`]. Nothing is persisted across restarts.

mod repository;
mod seed;

use std::fmt::Debug;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::types::{Author, Course, StoredEntity};

/// In-memory implementation of [`LibraryRepository`](crate::core::LibraryRepository).
///
/// # Example
///
/// ```
/// use courselib_persistence::backends::memory::InMemoryRepository;
/// use courselib_persistence::core::LibraryRepository;
///
/// let repo = InMemoryRepository::with_seed_data();
/// assert_eq!(repo.backend_name(), "memory");
/// assert!(repo.author_count() > 0);
/// ```
#[derive(Default)]
pub struct InMemoryRepository {
    data: RwLock<LibraryData>,
}

#[derive(Default)]
struct LibraryData {
    authors: Vec<StoredEntity<Author>>,
    courses: Vec<StoredEntity<Course>>,
}

impl LibraryData {
    fn author(&self, id: Uuid) -> Option<&StoredEntity<Author>> {
        self.authors.iter().find(|stored| stored.id() == id)
    }

    fn course(&self, author_id: Uuid, course_id: Uuid) -> Option<&StoredEntity<Course>> {
        self.courses
            .iter()
            .find(|stored| stored.id() == course_id && stored.value().author_id == author_id)
    }

    fn course_by_id(&self, course_id: Uuid) -> Option<&StoredEntity<Course>> {
        self.courses.iter().find(|stored| stored.id() == course_id)
    }
}

impl Debug for InMemoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.data.read();
        f.debug_struct("InMemoryRepository")
            .field("authors", &data.authors.len())
            .field("courses", &data.courses.len())
            .finish()
    }
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with a fixed set of authors and courses.
    pub fn with_seed_data() -> Self {
        let (authors, courses) = seed::seed_data();
        Self {
            data: RwLock::new(LibraryData {
                authors: authors.into_iter().map(StoredEntity::new).collect(),
                courses: courses.into_iter().map(StoredEntity::new).collect(),
            }),
        }
    }

    /// Number of stored authors.
    pub fn author_count(&self) -> usize {
        self.data.read().authors.len()
    }

    /// Number of stored courses across all authors.
    pub fn course_count(&self) -> usize {
        self.data.read().courses.len()
    }
}
