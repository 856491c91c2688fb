//! Error types for the Course Library API.
//!
//! This module defines the single error type used at the request boundary,
//! with automatic conversion to RFC 7807 problem details.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | BadRequest | 400 |
//! | ValidationFailed | 422 |
//! | PreconditionFailed | 412 |
//! | Conflict | 409 |
//! | UnsupportedMediaType | 415 |
//! | InternalError | 500 |
//!
//! Storage errors from the persistence layer convert through `From`:
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | NotFound | 404 |
//! | AlreadyExists | 409 |
//! | VersionConflict | 412 |
//! | InvalidQuery | 400 |

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use courselib_persistence::error::StorageError;
use serde_json::Value;

use crate::dto::validation::{FieldViolation, Validate};
use crate::extractors::ordering::OrderByError;
use crate::middleware::content_type::MediaTypeError;
use crate::responses::shaping::FieldSpecError;

/// Media type of error bodies.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Entity not found (HTTP 404).
    NotFound {
        /// The entity type (e.g., "Author").
        entity_type: String,
        /// The entity ID.
        id: String,
    },

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Request body violates DTO constraints (HTTP 422).
    ValidationFailed {
        /// Every violated constraint.
        violations: Vec<FieldViolation>,
    },

    /// If-Match did not match (HTTP 412).
    PreconditionFailed {
        /// Message describing why the precondition failed.
        message: String,
    },

    /// Identifier clash (HTTP 409).
    Conflict {
        /// Message describing the conflict.
        message: String,
    },

    /// Unsupported media type (HTTP 415).
    UnsupportedMediaType {
        /// The unsupported content type.
        content_type: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates a `NotFound` error for an entity.
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        RestError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a `BadRequest` error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::PreconditionFailed { .. } => StatusCode::PRECONDITION_FAILED,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fails with `ValidationFailed` if the value violates any constraint.
pub fn ensure_valid<T: Validate>(value: &T) -> RestResult<()> {
    let violations = value.validate();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(RestError::ValidationFailed { violations })
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { entity_type, id } => {
                write!(f, "{} not found: {}", entity_type, id)
            }
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::ValidationFailed { violations } => {
                write!(f, "Validation failed: {} violation(s)", violations.len())
            }
            RestError::PreconditionFailed { message } => {
                write!(f, "Precondition failed: {}", message)
            }
            RestError::Conflict { message } => {
                write!(f, "Conflict: {}", message)
            }
            RestError::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type: {}", content_type)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (title, detail) = match &self {
            RestError::NotFound { entity_type, id } => (
                "Not Found",
                format!("{} {} was not found", entity_type, id),
            ),
            RestError::BadRequest { message } => ("Bad Request", message.clone()),
            RestError::ValidationFailed { .. } => (
                "One or more validation errors occurred.",
                "See the errors field for details.".to_string(),
            ),
            RestError::PreconditionFailed { message } => ("Precondition Failed", message.clone()),
            RestError::Conflict { message } => ("Conflict", message.clone()),
            RestError::UnsupportedMediaType { content_type } => (
                "Unsupported Media Type",
                format!("Content type '{}' is not supported", content_type),
            ),
            RestError::InternalError { message } => ("Internal Server Error", message.clone()),
        };

        let mut body = create_problem_details(status, title, &detail);
        if let RestError::ValidationFailed { violations } = &self {
            body["errors"] = group_violations(violations);
        }

        let mut response = (status, Json(body)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_JSON),
        );
        response
    }
}

/// Creates an RFC 7807 problem details document.
///
/// # Arguments
///
/// * `status` - The HTTP status
/// * `title` - Short summary of the problem type
/// * `detail` - Human-readable details for this occurrence
fn create_problem_details(status: StatusCode, title: &str, detail: &str) -> Value {
    serde_json::json!({
        "type": problem_type(status),
        "title": title,
        "status": status.as_u16(),
        "detail": detail,
    })
}

fn problem_type(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.1",
        StatusCode::NOT_FOUND => "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.5",
        StatusCode::CONFLICT => "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.10",
        StatusCode::PRECONDITION_FAILED => {
            "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.13"
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.16"
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            "https://www.rfc-editor.org/rfc/rfc9110#section-15.5.21"
        }
        _ => "about:blank",
    }
}

/// Groups violations into `{ field: [messages] }`, fields sorted.
fn group_violations(violations: &[FieldViolation]) -> Value {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for violation in violations {
        grouped
            .entry(violation.field.as_str())
            .or_default()
            .push(violation.message.as_str());
    }
    serde_json::json!(grouped)
}

// Implement conversions from library errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity_type, id } => RestError::NotFound { entity_type, id },
            StorageError::AlreadyExists { .. } => RestError::Conflict {
                message: err.to_string(),
            },
            StorageError::VersionConflict { .. } => RestError::PreconditionFailed {
                message: err.to_string(),
            },
            StorageError::InvalidQuery { message } => RestError::BadRequest { message },
        }
    }
}

impl From<FieldSpecError> for RestError {
    fn from(err: FieldSpecError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<OrderByError> for RestError {
    fn from(err: OrderByError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<MediaTypeError> for RestError {
    fn from(err: MediaTypeError) -> Self {
        match err {
            MediaTypeError::Unparsable { .. } => RestError::BadRequest {
                message: err.to_string(),
            },
            MediaTypeError::Unsupported { media_type } => RestError::UnsupportedMediaType {
                content_type: media_type,
            },
            MediaTypeError::Missing => RestError::UnsupportedMediaType {
                content_type: "(none)".to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => RestError::ValidationFailed {
                violations: vec![FieldViolation::new("body", err.to_string())],
            },
            Category::Io | Category::Syntax | Category::Eof => RestError::BadRequest {
                message: format!("Invalid JSON: {}", err),
            },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RestError::not_found("Author", "123");
        assert_eq!(err.to_string(), "Author not found: 123");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_mapping() {
        let err: RestError = StorageError::not_found("Course", "7").into();
        assert!(matches!(err, RestError::NotFound { .. }));

        let err: RestError = StorageError::VersionConflict {
            entity_type: "Course".to_string(),
            id: "7".to_string(),
            expected: 1,
            actual: 2,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::PRECONDITION_FAILED);

        let err: RestError = StorageError::AlreadyExists {
            entity_type: "Author".to_string(),
            id: "1".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_create_problem_details() {
        let problem = create_problem_details(StatusCode::NOT_FOUND, "Not Found", "gone fishing");
        assert_eq!(problem["status"], 404);
        assert_eq!(problem["title"], "Not Found");
        assert_eq!(problem["detail"], "gone fishing");
    }

    #[test]
    fn test_group_violations() {
        let grouped = group_violations(&[
            FieldViolation::new("title", "required"),
            FieldViolation::new("description", "too long"),
            FieldViolation::new("title", "too short"),
        ]);
        assert_eq!(grouped["title"].as_array().unwrap().len(), 2);
        assert_eq!(grouped["description"][0], "too long");
    }

    #[test]
    fn test_json_error_classification() {
        let syntax = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(RestError::from(syntax).status_code(), StatusCode::BAD_REQUEST);

        let data = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        assert_eq!(
            RestError::from(data).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_response_is_problem_json() {
        let response = RestError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_JSON
        );
    }
}
