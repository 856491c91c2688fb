//! Content negotiation.
//!
//! Resolves the `Accept` header of an author read into a [`Representation`]
//! and the `Content-Type` of an author creation into an
//! [`AuthorCreationFormat`].
//!
//! Vendor media types select a shape and, optionally, hypermedia links:
//!
//! | Accept | Shape | Links |
//! |--------|-------|-------|
//! | `application/json` | friendly | no |
//! | `application/vnd.marvin.hateoas+json` | friendly | yes |
//! | `application/vnd.marvin.author.full+json` | full | no |
//! | `application/vnd.marvin.author.full.hateoas+json` | full | yes |
//! | `application/vnd.marvin.author.friendly.hateoas+json` | friendly | yes |

use axum::http::{HeaderMap, header};
use mime::Mime;
use thiserror::Error;

use crate::dto::AuthorShape;

/// Media type used when the client sends no `Accept` header.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Vendor type for creating an author.
pub const AUTHOR_FOR_CREATION: &str = "application/vnd.marvin.authorforcreation+json";

/// Vendor type for creating an author with a date of death.
pub const AUTHOR_FOR_CREATION_WITH_DATE_OF_DEATH: &str =
    "application/vnd.marvin.authorforcreationwithdateofdeath+json";

/// Media types accepted for a JSON Patch body.
pub const JSON_PATCH_MEDIA_TYPES: &[&str] = &["application/json-patch+json", "application/json"];

const HATEOAS_MARKER: &str = "hateoas";

/// Errors raised while interpreting media types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaTypeError {
    /// The header value is not a media type.
    #[error("'{value}' is not a valid media type")]
    Unparsable {
        /// The raw value.
        value: String,
    },

    /// The media type is valid but not accepted here.
    #[error("media type '{media_type}' is not supported")]
    Unsupported {
        /// The media type.
        media_type: String,
    },

    /// A body was sent without a `Content-Type`.
    #[error("missing Content-Type header")]
    Missing,
}

/// The negotiated representation of an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    /// The transfer shape.
    pub shape: AuthorShape,
    /// Whether hypermedia links are attached.
    pub include_links: bool,
    /// The negotiated media type, without parameters.
    pub media_type: String,
}

impl Representation {
    /// Resolves a media type (the first range of an `Accept` value).
    ///
    /// The structured-syntax suffix is ignored. A subtype ending in `hateoas`
    /// requests links; the last dot-separated segment of what remains picks
    /// the shape, defaulting to friendly.
    ///
    /// ```
    /// use courselib_rest::dto::AuthorShape;
    /// use courselib_rest::middleware::content_type::Representation;
    ///
    /// let rep = Representation::resolve("application/vnd.example.author.full.hateoas+json").unwrap();
    /// assert_eq!(rep.shape, AuthorShape::Full);
    /// assert!(rep.include_links);
    /// ```
    pub fn resolve(accept: &str) -> Result<Self, MediaTypeError> {
        let mime = parse_mime(first_media_range(accept))?;

        let subtype = mime.subtype().as_str().to_ascii_lowercase();
        let (rest, include_links) = match subtype.strip_suffix(HATEOAS_MARKER) {
            Some(rest) => (rest.strip_suffix('.').unwrap_or(rest), true),
            None => (subtype.as_str(), false),
        };

        let shape = match rest.rsplit('.').next() {
            Some("full") => AuthorShape::Full,
            _ => AuthorShape::Friendly,
        };

        Ok(Self {
            shape,
            include_links,
            media_type: mime.essence_str().to_ascii_lowercase(),
        })
    }

    /// Resolves the `Accept` header, treating a missing header as `application/json`.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, MediaTypeError> {
        match headers.get(header::ACCEPT) {
            None => Self::resolve(DEFAULT_MEDIA_TYPE),
            Some(value) => {
                let accept = value.to_str().map_err(|_| MediaTypeError::Unparsable {
                    value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
                })?;
                Self::resolve(accept)
            }
        }
    }

    /// Returns the `Content-Type` for a response in this representation.
    ///
    /// Vendor types are echoed; anything else is sent as `application/json`.
    pub fn response_content_type(&self) -> &str {
        if self.media_type.starts_with("application/vnd.") {
            &self.media_type
        } else {
            DEFAULT_MEDIA_TYPE
        }
    }
}

/// The body formats accepted when creating an author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorCreationFormat {
    /// [`CreateAuthorDto`](crate::dto::CreateAuthorDto).
    Standard,
    /// [`CreateAuthorWithDateOfDeathDto`](crate::dto::CreateAuthorWithDateOfDeathDto).
    WithDateOfDeath,
}

impl AuthorCreationFormat {
    /// Picks the body format from the request's `Content-Type`.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, MediaTypeError> {
        let mime = request_content_type(headers)?;
        match mime.essence_str().to_ascii_lowercase().as_str() {
            DEFAULT_MEDIA_TYPE | AUTHOR_FOR_CREATION => Ok(AuthorCreationFormat::Standard),
            AUTHOR_FOR_CREATION_WITH_DATE_OF_DEATH => Ok(AuthorCreationFormat::WithDateOfDeath),
            other => Err(MediaTypeError::Unsupported {
                media_type: other.to_string(),
            }),
        }
    }
}

/// Validates the request's `Content-Type` against a list of accepted types.
pub fn require_content_type(headers: &HeaderMap, accepted: &[&str]) -> Result<(), MediaTypeError> {
    let mime = request_content_type(headers)?;
    let essence = mime.essence_str().to_ascii_lowercase();
    if accepted.iter().any(|a| a.eq_ignore_ascii_case(&essence)) {
        Ok(())
    } else {
        Err(MediaTypeError::Unsupported {
            media_type: essence,
        })
    }
}

fn request_content_type(headers: &HeaderMap) -> Result<Mime, MediaTypeError> {
    let value = headers
        .get(header::CONTENT_TYPE)
        .ok_or(MediaTypeError::Missing)?;
    let raw = value.to_str().map_err(|_| MediaTypeError::Unparsable {
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })?;
    parse_mime(raw.trim())
}

/// Returns the first media range of an `Accept` value.
///
/// Commas inside quoted parameter values do not separate ranges.
fn first_media_range(accept: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    for (index, c) in accept.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return accept[..index].trim(),
            _ => {}
        }
    }
    accept.trim()
}

fn parse_mime(value: &str) -> Result<Mime, MediaTypeError> {
    value.parse::<Mime>().map_err(|_| MediaTypeError::Unparsable {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: header::HeaderName, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_plain_json_is_friendly_without_links() {
        let rep = Representation::resolve("application/json").unwrap();
        assert_eq!(rep.shape, AuthorShape::Friendly);
        assert!(!rep.include_links);
        assert_eq!(rep.response_content_type(), "application/json");
    }

    #[test]
    fn test_full_hateoas() {
        let rep =
            Representation::resolve("application/vnd.example.author.full.hateoas+json").unwrap();
        assert_eq!(rep.shape, AuthorShape::Full);
        assert!(rep.include_links);
        assert_eq!(
            rep.response_content_type(),
            "application/vnd.example.author.full.hateoas+json"
        );
    }

    #[test]
    fn test_hateoas_without_shape() {
        let rep = Representation::resolve("application/vnd.marvin.hateoas+json").unwrap();
        assert_eq!(rep.shape, AuthorShape::Friendly);
        assert!(rep.include_links);
    }

    #[test]
    fn test_full_without_links_case_insensitive() {
        let rep = Representation::resolve("Application/VND.Marvin.Author.FULL+json").unwrap();
        assert_eq!(rep.shape, AuthorShape::Full);
        assert!(!rep.include_links);
    }

    #[test]
    fn test_unknown_segment_falls_back_to_friendly() {
        let rep = Representation::resolve("application/vnd.marvin.author.compact+json").unwrap();
        assert_eq!(rep.shape, AuthorShape::Friendly);
    }

    #[test]
    fn test_first_range_wins_and_params_ignored() {
        let rep = Representation::resolve(
            "application/vnd.marvin.author.full+json;q=0.9, application/json",
        )
        .unwrap();
        assert_eq!(rep.shape, AuthorShape::Full);
        assert_eq!(rep.media_type, "application/vnd.marvin.author.full+json");
    }

    #[test]
    fn test_quoted_comma_stays_in_parameter() {
        let rep =
            Representation::resolve("application/vnd.marvin.author.full+json; foo=\"a,b\"").unwrap();
        assert_eq!(rep.shape, AuthorShape::Full);
        assert_eq!(rep.media_type, "application/vnd.marvin.author.full+json");
    }

    #[test]
    fn test_first_media_range() {
        assert_eq!(first_media_range(" a/b ; q=1 , c/d"), "a/b ; q=1");
        assert_eq!(first_media_range("a/b; p=\"1,2\", c/d"), "a/b; p=\"1,2\"");
        assert_eq!(first_media_range("a/b; p=\"x\\\",y\", c/d"), "a/b; p=\"x\\\",y\"");
        assert_eq!(first_media_range("a/b"), "a/b");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let once = Representation::resolve("application/vnd.marvin.hateoas+json").unwrap();
        let twice = Representation::resolve(&once.media_type).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unparsable() {
        assert!(matches!(
            Representation::resolve("not a media type"),
            Err(MediaTypeError::Unparsable { .. })
        ));
    }

    #[test]
    fn test_missing_accept_defaults_to_json() {
        let rep = Representation::from_headers(&HeaderMap::new()).unwrap();
        assert_eq!(rep.media_type, DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn test_creation_format() {
        let h = headers(header::CONTENT_TYPE, "application/json; charset=utf-8");
        assert_eq!(
            AuthorCreationFormat::from_headers(&h),
            Ok(AuthorCreationFormat::Standard)
        );

        let h = headers(header::CONTENT_TYPE, AUTHOR_FOR_CREATION_WITH_DATE_OF_DEATH);
        assert_eq!(
            AuthorCreationFormat::from_headers(&h),
            Ok(AuthorCreationFormat::WithDateOfDeath)
        );

        let h = headers(header::CONTENT_TYPE, "text/plain");
        assert!(matches!(
            AuthorCreationFormat::from_headers(&h),
            Err(MediaTypeError::Unsupported { .. })
        ));

        assert_eq!(
            AuthorCreationFormat::from_headers(&HeaderMap::new()),
            Err(MediaTypeError::Missing)
        );
    }

    #[test]
    fn test_require_content_type() {
        let h = headers(header::CONTENT_TYPE, "application/json-patch+json");
        assert!(require_content_type(&h, JSON_PATCH_MEDIA_TYPES).is_ok());

        let h = headers(header::CONTENT_TYPE, "application/xml");
        assert!(require_content_type(&h, JSON_PATCH_MEDIA_TYPES).is_err());
    }
}
