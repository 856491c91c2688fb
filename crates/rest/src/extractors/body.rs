//! JSON request body extractor.
//!
//! Malformed JSON is a `400 Bad Request`; well-formed JSON of the wrong shape
//! (a missing required field, a string where a date is expected) is a
//! `422 Unprocessable Entity`.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use crate::error::{RestError, RestResult};
use crate::middleware::content_type::MediaTypeError;

/// Axum extractor for a typed JSON body.
///
/// Accepts `application/json` and any `+json` media type.
///
/// # Example
///
/// ```rust,ignore
/// use courselib_rest::dto::CreateCourseDto;
/// use courselib_rest::extractors::JsonBody;
///
/// async fn create_handler(JsonBody(course): JsonBody<CreateCourseDto>) {
///     println!("Title: {}", course.title);
/// }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    /// Consumes the extractor and returns the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Deserializes a JSON document.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> RestResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Fails unless the request declares a JSON body.
pub fn require_json_content_type(headers: &HeaderMap) -> Result<(), MediaTypeError> {
    let value = headers
        .get(header::CONTENT_TYPE)
        .ok_or(MediaTypeError::Missing)?;
    let raw = value.to_str().map_err(|_| MediaTypeError::Unparsable {
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })?;
    let mime: mime::Mime = raw.parse().map_err(|_| MediaTypeError::Unparsable {
        value: raw.to_string(),
    })?;

    let is_json = mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON));
    if is_json {
        Ok(())
    } else {
        Err(MediaTypeError::Unsupported {
            media_type: mime.essence_str().to_string(),
        })
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        require_json_content_type(req.headers())?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RestError::bad_request(e.body_text()))?;

        parse_json(&bytes).map(JsonBody)
    }
}
