//! Repository backend implementations.
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`memory`] | Process-local storage, seeded or empty |
//!
//! # Example
//!
//! ```
//! use courselib_persistence::backends::memory::InMemoryRepository;
//!
//! // An empty repository
//! let repo = InMemoryRepository::new();
//! assert_eq!(repo.author_count(), 0);
//!
//! // Or one pre-populated with demo authors and courses
//! let repo = InMemoryRepository::with_seed_data();
//! assert!(repo.course_count() > 0);
//! ```

pub mod memory;
