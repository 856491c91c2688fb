//! HTTP request interpretation for the course library API.
//!
//! - [`content_type`] - Content negotiation (Accept, Content-Type)
//! - [`conditional`] - Conditional request headers (If-Match, etc.)

pub mod conditional;
pub mod content_type;

pub use conditional::ConditionalHeaders;
pub use content_type::{AuthorCreationFormat, Representation};
