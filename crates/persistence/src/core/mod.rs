//! Core repository traits.
//!
//! - [`LibraryRepository`] - Author and course operations
//!
//! # Example: Implementing a Backend
//!
//! ```ignore
//! use async_trait::async_trait;
//! use courselib_persistence::core::LibraryRepository;
//! use courselib_persistence::error::StorageResult;
//!
//! struct MyBackend {
//!     // ... backend-specific fields
//! }
//!
//! #[async_trait]
//! impl LibraryRepository for MyBackend {
//!     fn backend_name(&self) -> &'static str {
//!         "my-backend"
//!     }
//!
//!     // ... remaining operations
//! }
//! ```

mod repository;

pub use repository::LibraryRepository;
