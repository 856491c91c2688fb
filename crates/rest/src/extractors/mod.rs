//! Axum extractors and request parsing helpers.
//!
//! - [`AuthorsParameters`] - Extract author list filtering, sorting and paging
//! - [`FieldSelection`] - Extract `fields` for a single-entity read
//! - [`JsonBody`] - Extract a typed JSON request body
//! - [`ordering`] - `orderBy` to entity sort key mapping
//! - [`ids`] - `(id1,id2)` identifier lists

mod body;
pub mod ids;
pub mod ordering;
mod parameters;

pub use body::{JsonBody, parse_json, require_json_content_type};
pub use parameters::{AuthorsParameters, DEFAULT_ORDER_BY, FieldSelection};
