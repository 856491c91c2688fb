//! Conditional request header handling.
//!
//! Handles HTTP conditional headers:
//! - If-Match: Optimistic locking for course updates and deletes
//! - If-None-Match: Conditional read
//! - If-Modified-Since: Conditional read by date

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use chrono::{DateTime, Utc};
use courselib_persistence::types::{Entity, StoredEntity};

use crate::error::{RestError, RestResult};

/// Extracted conditional headers from a request.
#[derive(Debug, Default)]
pub struct ConditionalHeaders {
    /// If-Match header value (for optimistic locking).
    if_match: Option<String>,

    /// If-None-Match header value (for conditional read).
    if_none_match: Option<String>,

    /// If-Modified-Since header value.
    if_modified_since: Option<DateTime<Utc>>,
}

impl ConditionalHeaders {
    /// Creates a new ConditionalHeaders from a HeaderMap.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let if_match = headers
            .get(header::IF_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let if_none_match = headers
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let if_modified_since = headers
            .get(header::IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| DateTime::parse_from_rfc2822(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            if_match,
            if_none_match,
            if_modified_since,
        }
    }

    /// Returns the If-Match header value.
    pub fn if_match(&self) -> Option<&str> {
        self.if_match.as_deref()
    }

    /// Returns the If-None-Match header value.
    pub fn if_none_match(&self) -> Option<&str> {
        self.if_none_match.as_deref()
    }

    /// Returns the If-Modified-Since header value.
    pub fn if_modified_since(&self) -> Option<DateTime<Utc>> {
        self.if_modified_since
    }

    /// Checks if any conditional headers are present.
    pub fn has_conditions(&self) -> bool {
        self.if_match.is_some() || self.if_none_match.is_some() || self.if_modified_since.is_some()
    }

    /// Returns true if a read should answer 304 Not Modified.
    ///
    /// If-None-Match takes precedence; If-Modified-Since is only consulted
    /// when it is absent. HTTP dates have second precision.
    pub fn is_not_modified<T: Entity>(&self, stored: &StoredEntity<T>) -> bool {
        if let Some(etags) = self.if_none_match() {
            return stored.matches_etag(etags);
        }
        match self.if_modified_since {
            Some(since) => stored.last_modified().timestamp() <= since.timestamp(),
            None => false,
        }
    }

    /// Fails with `PreconditionFailed` if If-Match does not match the stored version.
    pub fn check_if_match<T: Entity>(&self, stored: &StoredEntity<T>) -> RestResult<()> {
        match self.if_match() {
            Some(etag) if !stored.matches_etag(etag) => Err(RestError::PreconditionFailed {
                message: format!(
                    "If-Match {} does not match current ETag {}",
                    etag,
                    stored.etag()
                ),
            }),
            _ => Ok(()),
        }
    }

    /// Fails with `PreconditionFailed` if If-Match is present for an entity that does not exist.
    pub fn check_if_match_absent(&self) -> RestResult<()> {
        match self.if_match() {
            Some(etag) => Err(RestError::PreconditionFailed {
                message: format!("If-Match {} given but nothing exists to match", etag),
            }),
            None => Ok(()),
        }
    }
}

/// Axum extractor for conditional headers.
impl<S> FromRequestParts<S> for ConditionalHeaders
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ConditionalHeaders::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use courselib_persistence::types::Course;
    use uuid::Uuid;

    fn stored_course() -> StoredEntity<Course> {
        StoredEntity::new(Course {
            id: Uuid::new_v4(),
            title: "Knots".to_string(),
            description: None,
            author_id: Uuid::new_v4(),
        })
    }

    #[test]
    fn test_from_headers_if_match() {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_MATCH, HeaderValue::from_static("W/\"1\""));

        let conditional = ConditionalHeaders::from_headers(&headers);
        assert_eq!(conditional.if_match(), Some("W/\"1\""));
    }

    #[test]
    fn test_from_headers_if_modified_since() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Sun, 06 Nov 1994 08:49:37 GMT"),
        );

        let conditional = ConditionalHeaders::from_headers(&headers);
        assert_eq!(
            conditional.if_modified_since().map(|d| d.timestamp()),
            Some(784111777)
        );
    }

    #[test]
    fn test_not_modified_by_etag() {
        let stored = stored_course();
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("W/\"1\""));
        assert!(ConditionalHeaders::from_headers(&headers).is_not_modified(&stored));

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("W/\"9\""));
        assert!(!ConditionalHeaders::from_headers(&headers).is_not_modified(&stored));
    }

    #[test]
    fn test_not_modified_by_date() {
        let stored = stored_course();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_static("Sun, 06 Nov 1994 08:49:37 GMT"),
        );
        assert!(!ConditionalHeaders::from_headers(&headers).is_not_modified(&stored));

        let later = (Utc::now() + chrono::Duration::hours(1))
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string();
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_str(&later).unwrap(),
        );
        assert!(ConditionalHeaders::from_headers(&headers).is_not_modified(&stored));
    }

    #[test]
    fn test_check_if_match() {
        let stored = stored_course();
        assert!(ConditionalHeaders::default().check_if_match(&stored).is_ok());

        let mut headers = HeaderMap::new();
        headers.insert(header::IF_MATCH, HeaderValue::from_static("W/\"2\""));
        let conditional = ConditionalHeaders::from_headers(&headers);
        assert!(matches!(
            conditional.check_if_match(&stored),
            Err(RestError::PreconditionFailed { .. })
        ));
        assert!(conditional.check_if_match_absent().is_err());
    }

    #[test]
    fn test_has_conditions() {
        let empty = ConditionalHeaders::default();
        assert!(!empty.has_conditions());

        let mut headers = HeaderMap::new();
        headers.insert(header::IF_MATCH, HeaderValue::from_static("W/\"1\""));
        let with_conditions = ConditionalHeaders::from_headers(&headers);
        assert!(with_conditions.has_conditions());
    }
}
