//! Core repository trait.
//!
//! This module defines the [`LibraryRepository`] trait, the narrow interface
//! the HTTP layer uses to read and mutate authors and their courses.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageResult;
use crate::types::{Author, AuthorQuery, Course, PagedList, StoredEntity};

/// Storage for authors and their nested courses.
///
/// Reads return `Ok(None)` when an entity is absent. Mutations that target a
/// missing entity fail with [`StorageError::NotFound`](crate::error::StorageError::NotFound).
///
/// # Versioning
///
/// Every stored entity carries a version starting at 1. Updates go through
/// [`update_course`](LibraryRepository::update_course), which takes the version
/// the caller read and fails with a version conflict if it has moved on.
///
/// # Example
///
/// ```ignore
/// use courselib_persistence::core::LibraryRepository;
/// use courselib_persistence::types::AuthorQuery;
///
/// async fn first_page<R: LibraryRepository>(repo: &R) -> StorageResult<()> {
///     let page = repo.list_authors(&AuthorQuery::default()).await?;
///     for author in page.items() {
///         println!("{} {}", author.value().first_name, author.value().last_name);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Returns one page of authors matching the query.
    async fn list_authors(&self, query: &AuthorQuery) -> StorageResult<PagedList<StoredEntity<Author>>>;

    /// Returns the authors with the given ids, in the order requested.
    ///
    /// Unknown ids are skipped; callers compare lengths to detect them.
    async fn authors_by_ids(&self, ids: &[Uuid]) -> StorageResult<Vec<StoredEntity<Author>>>;

    /// Checks whether an author exists.
    async fn author_exists(&self, author_id: Uuid) -> StorageResult<bool>;

    /// Reads an author by id.
    async fn get_author(&self, author_id: Uuid) -> StorageResult<Option<StoredEntity<Author>>>;

    /// Stores a new author together with its initial courses.
    ///
    /// The courses' `author_id` is overwritten with the author's id.
    ///
    /// # Errors
    ///
    /// * `StorageError::AlreadyExists` - If an author or course with the same id exists
    async fn add_author(
        &self,
        author: Author,
        courses: Vec<Course>,
    ) -> StorageResult<StoredEntity<Author>>;

    /// Deletes an author and all of its courses.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If the author does not exist
    async fn delete_author(&self, author_id: Uuid) -> StorageResult<()>;

    /// Returns all courses of an author, in insertion order.
    async fn list_courses(&self, author_id: Uuid) -> StorageResult<Vec<StoredEntity<Course>>>;

    /// Reads one course of an author.
    async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> StorageResult<Option<StoredEntity<Course>>>;

    /// Stores a new course for an author.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If the author does not exist
    /// * `StorageError::AlreadyExists` - If a course with the same id exists
    async fn add_course(&self, author_id: Uuid, course: Course) -> StorageResult<StoredEntity<Course>>;

    /// Replaces a course, producing the next version.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If the course no longer exists
    /// * `StorageError::VersionConflict` - If `current` is not the latest version
    async fn update_course(
        &self,
        current: &StoredEntity<Course>,
        course: Course,
    ) -> StorageResult<StoredEntity<Course>>;

    /// Deletes one course of an author.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - If the course does not exist
    async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> StorageResult<()>;
}
