//! Course replacement handler.
//!
//! `PUT [base]/api/authors/{authorId}/courses/{courseId}` replaces a course,
//! or creates it under the given id when it does not exist yet.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courselib_persistence::core::LibraryRepository;
use courselib_persistence::types::{Course, StoredEntity};
use tracing::debug;
use uuid::Uuid;

use crate::dto::{CourseDto, UpdateCourseDto};
use crate::error::{RestResult, ensure_valid};
use crate::extractors::JsonBody;
use crate::middleware::conditional::ConditionalHeaders;
use crate::responses::headers::ResourceHeaders;
use crate::state::AppState;

use super::courses::{ensure_author_exists, parse_course_path};

/// Stores a validated course body, creating or replacing.
///
/// - no current course: `If-Match` must be absent; `201 Created` with the course
/// - current course: `If-Match`, if given, must match; `204 No Content`
pub(crate) async fn upsert_course<S>(
    state: &AppState<S>,
    conditional: &ConditionalHeaders,
    author_id: Uuid,
    course_id: Uuid,
    current: Option<StoredEntity<Course>>,
    dto: UpdateCourseDto,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let course = dto.into_course(course_id, author_id);

    match current {
        None => {
            conditional.check_if_match_absent()?;

            let stored = state.storage().add_course(author_id, course).await?;
            debug!(course_id = %course_id, "Course created by upsert");

            let headers = ResourceHeaders::from_stored(&stored)
                .with_location(state.links().course_url(author_id, course_id));

            Ok((
                StatusCode::CREATED,
                headers.to_header_map(),
                Json(CourseDto::from(stored.value())),
            )
                .into_response())
        }
        Some(current) => {
            conditional.check_if_match(&current)?;

            let updated = state.storage().update_course(&current, course).await?;
            debug!(
                course_id = %course_id,
                version = updated.version(),
                "Course updated"
            );

            let headers = ResourceHeaders::from_stored(&updated).without_content_type();
            Ok((StatusCode::NO_CONTENT, headers.to_header_map()).into_response())
        }
    }
}

/// Handler for replacing a course.
///
/// # HTTP Request
///
/// `PUT [base]/api/authors/{authorId}/courses/{courseId}`
///
/// # Headers
///
/// - `If-Match` - Optimistic locking (ETag)
///
/// # Response
///
/// - `201 Created` - Course did not exist and was created under the given id
/// - `204 No Content` - Course replaced
/// - `400 Bad Request` - Malformed JSON
/// - `404 Not Found` - Author does not exist
/// - `412 Precondition Failed` - If-Match condition not met
/// - `422 Unprocessable Entity` - Validation failed
pub async fn update_course_handler<S>(
    State(state): State<AppState<S>>,
    Path((author_id, course_id)): Path<(String, String)>,
    conditional: ConditionalHeaders,
    JsonBody(dto): JsonBody<UpdateCourseDto>,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let (author_id, course_id) = parse_course_path(&author_id, &course_id)?;

    debug!(
        author_id = %author_id,
        course_id = %course_id,
        if_match = ?conditional.if_match(),
        "Processing course update request"
    );

    ensure_valid(&dto)?;
    ensure_author_exists(&state, author_id).await?;

    let current = state.storage().get_course(author_id, course_id).await?;

    upsert_course(&state, &conditional, author_id, course_id, current, dto).await
}
