//! HTTP request handlers for the course library API.
//!
//! - [`root`] - API root document
//! - [`authors`] - List, read, create and delete authors
//! - [`author_collections`] - Read and create sets of authors
//! - [`courses`] - List, read, create and delete courses
//! - [`update`] - Replace (upsert) a course
//! - [`patch`] - JSON Patch (upsert) a course
//! - [`health`] - Health check endpoint

pub mod author_collections;
pub mod authors;
pub mod courses;
pub mod health;
pub mod patch;
pub mod root;
pub mod update;

// Re-export handlers for convenience
pub use author_collections::{create_author_collection_handler, get_author_collection_handler};
pub use authors::{
    create_author_handler, delete_author_handler, get_author_handler, list_authors_handler,
    options_authors_handler,
};
pub use courses::{
    create_course_handler, delete_course_handler, get_course_handler, list_courses_handler,
};
pub use health::health_handler;
pub use patch::patch_course_handler;
pub use root::root_handler;
pub use update::update_course_handler;
