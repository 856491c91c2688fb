//! [`LibraryRepository`] implementation for the in-memory backend.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::core::LibraryRepository;
use crate::error::{StorageError, StorageResult};
use crate::types::{Author, AuthorQuery, Course, Entity, PagedList, StoredEntity};

use super::InMemoryRepository;

#[async_trait]
impl LibraryRepository for InMemoryRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_authors(
        &self,
        query: &AuthorQuery,
    ) -> StorageResult<PagedList<StoredEntity<Author>>> {
        if query.page_number == 0 {
            return Err(StorageError::InvalidQuery {
                message: "page number must be at least 1".to_string(),
            });
        }

        let data = self.data.read();
        let mut matching: Vec<StoredEntity<Author>> = data
            .authors
            .iter()
            .filter(|stored| query.matches(stored.value()))
            .cloned()
            .collect();

        // Stable sort keeps insertion order for ties.
        matching.sort_by(|a, b| query.compare(a.value(), b.value()));

        debug!(
            matched = matching.len(),
            page = query.page_number,
            page_size = query.page_size,
            "Listing authors"
        );

        Ok(PagedList::create(
            matching,
            query.page_number,
            query.page_size,
        ))
    }

    async fn authors_by_ids(&self, ids: &[Uuid]) -> StorageResult<Vec<StoredEntity<Author>>> {
        let data = self.data.read();
        Ok(ids
            .iter()
            .filter_map(|id| data.author(*id).cloned())
            .collect())
    }

    async fn author_exists(&self, author_id: Uuid) -> StorageResult<bool> {
        Ok(self.data.read().author(author_id).is_some())
    }

    async fn get_author(&self, author_id: Uuid) -> StorageResult<Option<StoredEntity<Author>>> {
        Ok(self.data.read().author(author_id).cloned())
    }

    async fn add_author(
        &self,
        author: Author,
        courses: Vec<Course>,
    ) -> StorageResult<StoredEntity<Author>> {
        let mut data = self.data.write();

        if data.author(author.id).is_some() {
            return Err(already_exists::<Author>(author.id));
        }
        if let Some(clash) = courses.iter().find(|c| data.course_by_id(c.id).is_some()) {
            return Err(already_exists::<Course>(clash.id));
        }

        let author_id = author.id;
        let stored = StoredEntity::new(author);
        data.authors.push(stored.clone());
        data.courses.extend(courses.into_iter().map(|mut course| {
            course.author_id = author_id;
            StoredEntity::new(course)
        }));

        debug!(author_id = %author_id, "Stored author");
        Ok(stored)
    }

    async fn delete_author(&self, author_id: Uuid) -> StorageResult<()> {
        let mut data = self.data.write();

        let before = data.authors.len();
        data.authors.retain(|stored| stored.id() != author_id);
        if data.authors.len() == before {
            return Err(StorageError::not_found(Author::ENTITY_TYPE, author_id));
        }

        data.courses
            .retain(|stored| stored.value().author_id != author_id);

        debug!(author_id = %author_id, "Deleted author and courses");
        Ok(())
    }

    async fn list_courses(&self, author_id: Uuid) -> StorageResult<Vec<StoredEntity<Course>>> {
        let data = self.data.read();
        Ok(data
            .courses
            .iter()
            .filter(|stored| stored.value().author_id == author_id)
            .cloned()
            .collect())
    }

    async fn get_course(
        &self,
        author_id: Uuid,
        course_id: Uuid,
    ) -> StorageResult<Option<StoredEntity<Course>>> {
        Ok(self.data.read().course(author_id, course_id).cloned())
    }

    async fn add_course(
        &self,
        author_id: Uuid,
        mut course: Course,
    ) -> StorageResult<StoredEntity<Course>> {
        let mut data = self.data.write();

        if data.author(author_id).is_none() {
            return Err(StorageError::not_found(Author::ENTITY_TYPE, author_id));
        }
        if data.course_by_id(course.id).is_some() {
            return Err(already_exists::<Course>(course.id));
        }

        course.author_id = author_id;
        let stored = StoredEntity::new(course);
        data.courses.push(stored.clone());

        debug!(author_id = %author_id, course_id = %stored.id(), "Stored course");
        Ok(stored)
    }

    async fn update_course(
        &self,
        current: &StoredEntity<Course>,
        course: Course,
    ) -> StorageResult<StoredEntity<Course>> {
        let mut data = self.data.write();

        let slot = data
            .courses
            .iter_mut()
            .find(|stored| stored.id() == current.id())
            .ok_or_else(|| StorageError::not_found(Course::ENTITY_TYPE, current.id()))?;

        if slot.version() != current.version() {
            return Err(StorageError::VersionConflict {
                entity_type: Course::ENTITY_TYPE.to_string(),
                id: current.id().to_string(),
                expected: current.version(),
                actual: slot.version(),
            });
        }

        // Identity and ownership are not editable through an update.
        let course = Course {
            id: current.id(),
            author_id: current.value().author_id,
            ..course
        };
        let updated = slot.clone().new_version(course);
        *slot = updated.clone();

        debug!(
            course_id = %updated.id(),
            version = updated.version(),
            "Updated course"
        );
        Ok(updated)
    }

    async fn delete_course(&self, author_id: Uuid, course_id: Uuid) -> StorageResult<()> {
        let mut data = self.data.write();

        let before = data.courses.len();
        data.courses.retain(|stored| {
            !(stored.id() == course_id && stored.value().author_id == author_id)
        });
        if data.courses.len() == before {
            return Err(StorageError::not_found(Course::ENTITY_TYPE, course_id));
        }

        debug!(author_id = %author_id, course_id = %course_id, "Deleted course");
        Ok(())
    }
}

fn already_exists<T: Entity>(id: Uuid) -> StorageError {
    StorageError::AlreadyExists {
        entity_type: T::ENTITY_TYPE.to_string(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthorSortField, SortKey};
    use chrono::DateTime;

    fn author(first: &str, last: &str, category: &str) -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: DateTime::parse_from_rfc3339("1970-05-12T00:00:00+00:00").unwrap(),
            date_of_death: None,
            main_category: category.to_string(),
        }
    }

    fn course(title: &str) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: Some(format!("All about {title}")),
            author_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_add_author_assigns_course_owner() {
        let repo = InMemoryRepository::new();
        let a = author("Ada", "Lovelace", "Maths");
        let id = a.id;

        tokio_test::block_on(async {
            repo.add_author(a, vec![course("Engines")]).await.unwrap();
            let courses = repo.list_courses(id).await.unwrap();
            assert_eq!(courses.len(), 1);
            assert_eq!(courses[0].value().author_id, id);
        });
    }

    #[test]
    fn test_list_authors_sorted_and_paged() {
        let repo = InMemoryRepository::new();
        tokio_test::block_on(async {
            for (first, last) in [("Cy", "Zed"), ("Al", "Bee"), ("Bo", "Cee")] {
                repo.add_author(author(first, last, "Rum"), vec![])
                    .await
                    .unwrap();
            }

            let query = AuthorQuery::default()
                .with_sort(SortKey::ascending(AuthorSortField::FirstName))
                .with_page(1, 2);
            let page = repo.list_authors(&query).await.unwrap();

            assert_eq!(page.total_count(), 3);
            assert_eq!(page.total_pages(), 2);
            let names: Vec<_> = page
                .items()
                .iter()
                .map(|a| a.value().first_name.as_str())
                .collect();
            assert_eq!(names, vec!["Al", "Bo"]);
        });
    }

    #[test]
    fn test_page_zero_rejected() {
        let repo = InMemoryRepository::new();
        let query = AuthorQuery::default().with_page(0, 10);
        let result = tokio_test::block_on(repo.list_authors(&query));
        assert!(matches!(result, Err(StorageError::InvalidQuery { .. })));
    }

    #[test]
    fn test_update_course_version_conflict() {
        let repo = InMemoryRepository::new();
        let a = author("Ada", "Lovelace", "Maths");
        let author_id = a.id;

        tokio_test::block_on(async {
            repo.add_author(a, vec![]).await.unwrap();
            let stored = repo.add_course(author_id, course("Engines")).await.unwrap();

            let mut changed = stored.value().clone();
            changed.title = "Analytical Engines".to_string();
            let v2 = repo.update_course(&stored, changed.clone()).await.unwrap();
            assert_eq!(v2.version(), 2);

            let stale = repo.update_course(&stored, changed).await;
            assert!(matches!(
                stale,
                Err(StorageError::VersionConflict {
                    expected: 1,
                    actual: 2,
                    ..
                })
            ));
        });
    }
}
