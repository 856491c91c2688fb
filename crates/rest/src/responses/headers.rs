//! Response header generation.
//!
//! Provides utilities for building caching, location and pagination headers.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use courselib_persistence::types::{Entity, StoredEntity};
use serde::Serialize;

/// Name of the pagination metadata header.
pub const X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

/// `Cache-Control` for a single cacheable entity.
pub fn cache_control_public(max_age: u64) -> String {
    format!("public, max-age={max_age}")
}

/// `Cache-Control` for a cacheable collection.
pub fn cache_control_revalidate(max_age: u64) -> String {
    format!("public, max-age={max_age}, must-revalidate")
}

/// Formats a timestamp as an HTTP date.
pub fn http_date(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Builder for entity response headers.
///
/// Generates:
/// - ETag (version identifier)
/// - Last-Modified
/// - Location (for create operations)
/// - Content-Type
/// - Cache-Control
/// - X-Pagination (for author lists)
#[derive(Debug, Default)]
pub struct ResourceHeaders {
    /// ETag value (weak validator).
    etag: Option<String>,
    /// Last-Modified timestamp.
    last_modified: Option<String>,
    /// Location URL (for created entities).
    location: Option<String>,
    /// Content-Type.
    content_type: Option<String>,
    /// Cache-Control.
    cache_control: Option<String>,
    /// Serialized pagination metadata.
    pagination: Option<String>,
}

impl ResourceHeaders {
    /// Creates a new ResourceHeaders builder with a JSON content type.
    pub fn new() -> Self {
        Self {
            content_type: Some("application/json".to_string()),
            ..Default::default()
        }
    }

    /// Creates headers from a stored entity.
    pub fn from_stored<T: Entity>(stored: &StoredEntity<T>) -> Self {
        Self::new()
            .with_etag(stored.etag())
            .with_last_modified(http_date(stored.last_modified()))
    }

    /// Sets the ETag value.
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Sets the Last-Modified timestamp.
    pub fn with_last_modified(mut self, timestamp: impl Into<String>) -> Self {
        self.last_modified = Some(timestamp.into());
        self
    }

    /// Sets the Location URL.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the Content-Type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Removes the Content-Type, for bodiless responses.
    pub fn without_content_type(mut self) -> Self {
        self.content_type = None;
        self
    }

    /// Sets the Cache-Control value.
    pub fn with_cache_control(mut self, cache_control: impl Into<String>) -> Self {
        self.cache_control = Some(cache_control.into());
        self
    }

    /// Sets the X-Pagination metadata.
    ///
    /// Metadata that fails to serialize is left out.
    pub fn with_pagination<M: Serialize>(mut self, metadata: &M) -> Self {
        self.pagination = serde_json::to_string(metadata).ok();
        self
    }

    /// Converts to an Axum HeaderMap.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let entries = [
            (header::CONTENT_TYPE, &self.content_type),
            (header::ETAG, &self.etag),
            (header::LAST_MODIFIED, &self.last_modified),
            (header::LOCATION, &self.location),
            (header::CACHE_CONTROL, &self.cache_control),
            (X_PAGINATION, &self.pagination),
        ];

        for (name, value) in entries {
            if let Some(value) = value {
                if let Ok(value) = HeaderValue::from_str(value) {
                    headers.insert(name, value);
                }
            }
        }

        headers
    }

    /// Returns the ETag value.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Returns the Last-Modified value.
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Returns the Location value.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courselib_persistence::types::Course;
    use uuid::Uuid;

    #[test]
    fn test_new() {
        let headers = ResourceHeaders::new();
        assert_eq!(headers.content_type.as_deref(), Some("application/json"));
        assert!(headers.etag.is_none());
    }

    #[test]
    fn test_from_stored() {
        let stored = StoredEntity::new(Course {
            id: Uuid::new_v4(),
            title: "Knots".to_string(),
            description: None,
            author_id: Uuid::new_v4(),
        });
        let headers = ResourceHeaders::from_stored(&stored);
        assert_eq!(headers.etag(), Some("W/\"1\""));
        assert!(headers.last_modified().unwrap().ends_with("GMT"));
    }

    #[test]
    fn test_to_header_map() {
        let headers = ResourceHeaders::new()
            .with_etag("W/\"1\"")
            .with_location("http://localhost:8080/api/authors/1")
            .with_cache_control(cache_control_public(1000));

        let map = headers.to_header_map();

        assert!(map.contains_key(header::CONTENT_TYPE));
        assert!(map.contains_key(header::ETAG));
        assert!(map.contains_key(header::LOCATION));
        assert_eq!(map.get(header::CACHE_CONTROL).unwrap(), "public, max-age=1000");
    }

    #[test]
    fn test_pagination_header() {
        let map = ResourceHeaders::new()
            .with_pagination(&serde_json::json!({ "totalCount": 3 }))
            .to_header_map();
        assert_eq!(map.get("x-pagination").unwrap(), "{\"totalCount\":3}");
    }

    #[test]
    fn test_without_content_type() {
        let map = ResourceHeaders::new().without_content_type().to_header_map();
        assert!(!map.contains_key(header::CONTENT_TYPE));
    }

    #[test]
    fn test_cache_control_revalidate() {
        assert_eq!(
            cache_control_revalidate(60),
            "public, max-age=60, must-revalidate"
        );
    }
}
