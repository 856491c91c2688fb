//! REST API test harness.
//!
//! Provides a test server over an in-memory repository the test can also
//! reach directly.

use std::sync::Arc;

use axum_test::TestServer;
use courselib_persistence::backends::memory::InMemoryRepository;
use courselib_persistence::core::LibraryRepository;
use courselib_persistence::types::{Author, Course, StoredEntity};
use uuid::Uuid;

use courselib_rest::{AppState, ServerConfig, routing};

use super::fixtures::AuthorFixture;

/// Test harness for REST API testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_read() {
///     let harness = RestTestHarness::new();
///     let author = harness.seed_author(AuthorFixture::ada()).await;
///
///     let response = harness.server.get(&format!("/api/authors/{}", author.id())).await;
///
///     assert_eq!(response.status_code(), 200);
/// }
/// ```
pub struct RestTestHarness {
    /// The test server instance.
    pub server: TestServer,

    /// The repository behind the server.
    pub repository: Arc<InMemoryRepository>,

    /// Server configuration.
    pub config: ServerConfig,
}

impl RestTestHarness {
    /// Creates a harness over an empty repository.
    pub fn new() -> Self {
        Self::with_repository(InMemoryRepository::new(), ServerConfig::for_testing())
    }

    /// Creates a harness over the demo data set.
    pub fn seeded() -> Self {
        Self::with_repository(
            InMemoryRepository::with_seed_data(),
            ServerConfig::for_testing(),
        )
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_repository(InMemoryRepository::new(), config)
    }

    fn with_repository(repository: InMemoryRepository, config: ServerConfig) -> Self {
        let repository = Arc::new(repository);
        let state = AppState::new(Arc::clone(&repository), config.clone())
            .expect("Failed to create app state");
        let app = routing::create_routes(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            repository,
            config,
        }
    }

    /// Stores an author directly in the repository.
    pub async fn seed_author(&self, fixture: AuthorFixture) -> StoredEntity<Author> {
        self.repository
            .add_author(fixture.to_author(), Vec::new())
            .await
            .expect("Failed to seed author")
    }

    /// Stores `count` authors named `Author00`, `Author01`, ... in one category.
    pub async fn seed_authors(&self, count: usize, category: &str) -> Vec<StoredEntity<Author>> {
        let mut seeded = Vec::with_capacity(count);
        for i in 0..count {
            let fixture = AuthorFixture::new(&format!("Author{i:02}"), "Test").category(category);
            seeded.push(self.seed_author(fixture).await);
        }
        seeded
    }

    /// Stores a course directly in the repository.
    pub async fn seed_course(
        &self,
        author_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> StoredEntity<Course> {
        let course = Course {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.map(str::to_string),
            author_id,
        };
        self.repository
            .add_course(author_id, course)
            .await
            .expect("Failed to seed course")
    }

    /// Path of an author.
    pub fn author_path(&self, author_id: Uuid) -> String {
        format!("/api/authors/{author_id}")
    }

    /// Path of a course.
    pub fn course_path(&self, author_id: Uuid, course_id: Uuid) -> String {
        format!("/api/authors/{author_id}/courses/{course_id}")
    }

    /// Absolute URL the server generates for a path.
    pub fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}
