//! Course patch handler.
//!
//! Applies a JSON Patch (RFC 6902) document to the update representation of
//! a course: `{ "title": ..., "description": ... }`. A missing course is
//! patched from an empty document and created under the given id.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use courselib_persistence::core::LibraryRepository;
use serde_json::Value;
use tracing::debug;

use crate::dto::UpdateCourseDto;
use crate::dto::validation::FieldViolation;
use crate::error::{RestError, RestResult, ensure_valid};
use crate::middleware::conditional::ConditionalHeaders;
use crate::middleware::content_type::{JSON_PATCH_MEDIA_TYPES, require_content_type};
use crate::state::AppState;

use super::courses::{ensure_author_exists, parse_course_path};
use super::update::upsert_course;

/// Parses a JSON Patch document.
///
/// # Errors
///
/// `BadRequest` if the body is not a JSON array of patch operations.
pub fn parse_patch(body: &[u8]) -> RestResult<json_patch::Patch> {
    serde_json::from_slice(body).map_err(|e| RestError::BadRequest {
        message: format!("Invalid JSON Patch document: {}", e),
    })
}

/// Applies a patch to a course's update representation.
///
/// # Errors
///
/// `ValidationFailed` if an operation cannot be applied (a failed `test`, a
/// missing path) or the result is not a course update document.
pub fn apply_patch(target: &UpdateCourseDto, patch: &json_patch::Patch) -> RestResult<UpdateCourseDto> {
    let mut document: Value = serde_json::to_value(target).map_err(|e| RestError::InternalError {
        message: format!("failed to serialize course: {}", e),
    })?;

    json_patch::patch(&mut document, patch).map_err(|e| RestError::ValidationFailed {
        violations: vec![FieldViolation::new("patch", e.to_string())],
    })?;

    serde_json::from_value(document).map_err(|e| RestError::ValidationFailed {
        violations: vec![FieldViolation::new("patch", e.to_string())],
    })
}

/// Handler for patching a course.
///
/// # HTTP Request
///
/// `PATCH [base]/api/authors/{authorId}/courses/{courseId}`
///
/// # Headers
///
/// - `Content-Type` - `application/json-patch+json` or `application/json`
/// - `If-Match` - Optimistic locking (ETag)
///
/// # Response
///
/// - `201 Created` - Course did not exist and was created from the patch
/// - `204 No Content` - Course patched
/// - `400 Bad Request` - Malformed patch document
/// - `404 Not Found` - Author does not exist
/// - `412 Precondition Failed` - If-Match condition not met
/// - `415 Unsupported Media Type` - Unknown Content-Type
/// - `422 Unprocessable Entity` - Patch could not be applied or the result is invalid
pub async fn patch_course_handler<S>(
    State(state): State<AppState<S>>,
    Path((author_id, course_id)): Path<(String, String)>,
    conditional: ConditionalHeaders,
    headers: HeaderMap,
    body: Bytes,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    require_content_type(&headers, JSON_PATCH_MEDIA_TYPES)?;
    let (author_id, course_id) = parse_course_path(&author_id, &course_id)?;
    let patch = parse_patch(&body)?;

    debug!(
        author_id = %author_id,
        course_id = %course_id,
        operations = patch.0.len(),
        if_match = ?conditional.if_match(),
        "Processing course patch request"
    );

    ensure_author_exists(&state, author_id).await?;

    let current = state.storage().get_course(author_id, course_id).await?;

    let target = current
        .as_ref()
        .map(|stored| UpdateCourseDto::from(stored.value()))
        .unwrap_or_default();

    let patched = apply_patch(&target, &patch)?;
    ensure_valid(&patched)?;

    upsert_course(&state, &conditional, author_id, course_id, current, patched).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> UpdateCourseDto {
        UpdateCourseDto {
            title: "Knots".to_string(),
            description: Some("Tying them".to_string()),
        }
    }

    #[test]
    fn test_replace_title() {
        let patch = parse_patch(br#"[{"op": "replace", "path": "/title", "value": "Sails"}]"#)
            .unwrap();
        let patched = apply_patch(&course(), &patch).unwrap();
        assert_eq!(patched.title, "Sails");
        assert_eq!(patched.description.as_deref(), Some("Tying them"));
    }

    #[test]
    fn test_remove_description() {
        let patch = parse_patch(br#"[{"op": "remove", "path": "/description"}]"#).unwrap();
        let patched = apply_patch(&course(), &patch).unwrap();
        assert_eq!(patched.description, None);
    }

    #[test]
    fn test_patch_empty_document() {
        let patch = parse_patch(
            br#"[{"op": "add", "path": "/title", "value": "Maps"},
                 {"op": "add", "path": "/description", "value": "Reading them"}]"#,
        )
        .unwrap();
        let patched = apply_patch(&UpdateCourseDto::default(), &patch).unwrap();
        assert_eq!(patched.title, "Maps");
    }

    #[test]
    fn test_malformed_patch() {
        assert!(matches!(
            parse_patch(br#"{"op": "replace"}"#),
            Err(RestError::BadRequest { .. })
        ));
        assert!(matches!(
            parse_patch(br#"[{"op": "explode", "path": "/title"}]"#),
            Err(RestError::BadRequest { .. })
        ));
    }

    #[test]
    fn test_failed_operation() {
        let patch = parse_patch(br#"[{"op": "test", "path": "/title", "value": "Other"}]"#)
            .unwrap();
        assert!(matches!(
            apply_patch(&course(), &patch),
            Err(RestError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_wrong_type_after_patch() {
        let patch = parse_patch(br#"[{"op": "replace", "path": "/title", "value": 7}]"#).unwrap();
        assert!(matches!(
            apply_patch(&course(), &patch),
            Err(RestError::ValidationFailed { .. })
        ));
    }
}
