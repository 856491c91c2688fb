//! Response building for the course library API.
//!
//! - [`shaping`] - Field selection over DTO shapes
//! - [`links`] - Hypermedia link generation
//! - [`assembler`] - Author and author page bodies
//! - [`headers`] - Response header generation (ETag, Location, etc.)

pub mod assembler;
pub mod headers;
pub mod links;
pub mod shaping;

pub use assembler::{
    CollectionPayload, PaginationMetadata, assemble_author, assemble_author_as,
    assemble_author_collection, assemble_author_list,
};
pub use headers::ResourceHeaders;
pub use links::{Link, LinkBuilder, LinkError};
pub use shaping::{FieldSpec, ShapedObject, has_fields, project};
