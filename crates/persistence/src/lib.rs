//! Course Library Persistence Layer
//!
//! This crate owns the domain entities of the Course Library (authors and the
//! courses they write) and the [`LibraryRepository`](core::LibraryRepository)
//! trait the HTTP layer talks to.
//!
//! # Architecture
//!
//! - [`types`] - Entities, stored-entity metadata, paging and author queries
//! - [`error`] - Error types for all operations
//! - [`core`] - The repository trait
//! - [`backends`] - Backend implementations (in-memory)
//!
//! # Quick Start
//!
//! ```
//! use courselib_persistence::backends::memory::InMemoryRepository;
//! use courselib_persistence::core::LibraryRepository;
//! use courselib_persistence::types::{AuthorQuery, AuthorSortField, SortKey};
//!
//! # tokio_test::block_on(async {
//! let repo = InMemoryRepository::with_seed_data();
//!
//! let query = AuthorQuery::default()
//!     .with_main_category("Singing")
//!     .with_sort(SortKey::ascending(AuthorSortField::FirstName));
//! let page = repo.list_authors(&query).await.unwrap();
//!
//! assert_eq!(page.total_count(), 2);
//! assert_eq!(page.items()[0].value().first_name, "Arnold");
//! # });
//! ```
//!
//! # Versioning
//!
//! Every stored entity carries a version starting at 1 and exposes a weak
//! ETag derived from it:
//!
//! ```
//! use courselib_persistence::types::{Course, StoredEntity};
//! use uuid::Uuid;
//!
//! let course = StoredEntity::new(Course {
//!     id: Uuid::new_v4(),
//!     title: "Overthrowing Mutiny".to_string(),
//!     description: None,
//!     author_id: Uuid::new_v4(),
//! });
//!
//! assert!(course.matches_etag("W/\"1\""));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Author, AuthorQuery, Course, PagedList, StoredEntity};

// Re-export core traits
pub use core::LibraryRepository;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
