//! Core types for the repository layer.
//!
//! - [`Author`], [`Course`] - The domain entities
//! - [`StoredEntity`] - An entity with version and timestamps
//! - [`PagedList`] - One page of a result set
//! - [`AuthorQuery`], [`SortKey`] - Filtering, sorting and paging
//!
//! # Building an Author Query
//!
//! ```
//! use courselib_persistence::types::{AuthorQuery, AuthorSortField, SortKey};
//!
//! let query = AuthorQuery::default()
//!     .with_main_category("Rum")
//!     .with_sort(SortKey::ascending(AuthorSortField::FirstName))
//!     .with_sort(SortKey::ascending(AuthorSortField::LastName))
//!     .with_page(2, 5);
//!
//! assert_eq!(query.page_number, 2);
//! assert_eq!(query.sort.len(), 2);
//! ```

mod entity;
mod pagination;
mod query;
mod stored_entity;

pub use entity::{Author, Course, Entity};
pub use pagination::PagedList;
pub use query::{AuthorQuery, AuthorSortField, SortDirection, SortKey};
pub use stored_entity::StoredEntity;
