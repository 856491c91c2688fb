//! Course handlers.
//!
//! Courses live under their author: `[base]/api/authors/{authorId}/courses`.
//! Every operation answers `404 Not Found` when the author does not exist.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courselib_persistence::core::LibraryRepository;
use tracing::debug;
use uuid::Uuid;

use crate::dto::{CourseDto, CreateCourseDto};
use crate::error::{RestError, RestResult, ensure_valid};
use crate::extractors::JsonBody;
use crate::extractors::ids::parse_id;
use crate::middleware::conditional::ConditionalHeaders;
use crate::responses::headers::{ResourceHeaders, cache_control_public, cache_control_revalidate};
use crate::state::AppState;

/// Fails with `NotFound` unless the author exists.
pub(crate) async fn ensure_author_exists<S>(state: &AppState<S>, author_id: Uuid) -> RestResult<()>
where
    S: LibraryRepository + Send + Sync,
{
    if state.storage().author_exists(author_id).await? {
        Ok(())
    } else {
        debug!(author_id = %author_id, "Author not found");
        Err(RestError::not_found("Author", author_id))
    }
}

/// Parses the `{authorId}/courses/{courseId}` path pair.
pub(crate) fn parse_course_path(author_id: &str, course_id: &str) -> RestResult<(Uuid, Uuid)> {
    Ok((parse_id(author_id)?, parse_id(course_id)?))
}

/// Handler for listing an author's courses.
///
/// # HTTP Request
///
/// `GET [base]/api/authors/{authorId}/courses`
///
/// # Response
///
/// - `200 OK` - The courses, with `Cache-Control`
/// - `404 Not Found` - Author does not exist
pub async fn list_courses_handler<S>(
    State(state): State<AppState<S>>,
    Path(author_id): Path<String>,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let author_id = parse_id(&author_id)?;

    debug!(author_id = %author_id, "Processing course list request");

    ensure_author_exists(&state, author_id).await?;

    let courses: Vec<CourseDto> = state
        .storage()
        .list_courses(author_id)
        .await?
        .iter()
        .map(|stored| CourseDto::from(stored.value()))
        .collect();

    let headers =
        ResourceHeaders::new().with_cache_control(cache_control_revalidate(state.cache_max_age()));

    Ok((StatusCode::OK, headers.to_header_map(), Json(courses)).into_response())
}

/// Handler for reading a course.
///
/// # HTTP Request
///
/// `GET [base]/api/authors/{authorId}/courses/{courseId}`
///
/// # Headers
///
/// - `If-None-Match` - Return 304 Not Modified if the ETag matches
/// - `If-Modified-Since` - Return 304 Not Modified if not modified since date
///
/// # Response
///
/// - `200 OK` - The course, with `ETag`, `Last-Modified` and `Cache-Control`
/// - `304 Not Modified` - Course unchanged
/// - `404 Not Found` - Author or course does not exist
pub async fn get_course_handler<S>(
    State(state): State<AppState<S>>,
    Path((author_id, course_id)): Path<(String, String)>,
    conditional: ConditionalHeaders,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let (author_id, course_id) = parse_course_path(&author_id, &course_id)?;

    debug!(
        author_id = %author_id,
        course_id = %course_id,
        "Processing course read request"
    );

    ensure_author_exists(&state, author_id).await?;

    let stored = state
        .storage()
        .get_course(author_id, course_id)
        .await?
        .ok_or_else(|| RestError::not_found("Course", course_id))?;

    if conditional.is_not_modified(&stored) {
        debug!(etag = %stored.etag(), "Returning 304 Not Modified");
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let headers = ResourceHeaders::from_stored(&stored)
        .with_cache_control(cache_control_public(state.course_cache_max_age()));

    Ok((
        StatusCode::OK,
        headers.to_header_map(),
        Json(CourseDto::from(stored.value())),
    )
        .into_response())
}

/// Handler for creating a course.
///
/// # HTTP Request
///
/// `POST [base]/api/authors/{authorId}/courses`
///
/// # Response
///
/// - `201 Created` - The course, `Location` header
/// - `400 Bad Request` - Malformed JSON
/// - `404 Not Found` - Author does not exist
/// - `422 Unprocessable Entity` - Validation failed
pub async fn create_course_handler<S>(
    State(state): State<AppState<S>>,
    Path(author_id): Path<String>,
    JsonBody(dto): JsonBody<CreateCourseDto>,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let author_id = parse_id(&author_id)?;

    debug!(author_id = %author_id, "Processing course create request");

    ensure_valid(&dto)?;
    ensure_author_exists(&state, author_id).await?;

    let stored = state
        .storage()
        .add_course(author_id, dto.into_course(author_id))
        .await?;

    debug!(course_id = %stored.id(), "Course created");

    let headers = ResourceHeaders::from_stored(&stored)
        .with_location(state.links().course_url(author_id, stored.id()));

    Ok((
        StatusCode::CREATED,
        headers.to_header_map(),
        Json(CourseDto::from(stored.value())),
    )
        .into_response())
}

/// Handler for deleting a course.
///
/// # HTTP Request
///
/// `DELETE [base]/api/authors/{authorId}/courses/{courseId}`
///
/// # Headers
///
/// - `If-Match` - Optimistic locking (ETag)
///
/// # Response
///
/// - `204 No Content` - Course deleted
/// - `404 Not Found` - Author or course does not exist
/// - `412 Precondition Failed` - If-Match condition not met
pub async fn delete_course_handler<S>(
    State(state): State<AppState<S>>,
    Path((author_id, course_id)): Path<(String, String)>,
    conditional: ConditionalHeaders,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let (author_id, course_id) = parse_course_path(&author_id, &course_id)?;

    debug!(
        author_id = %author_id,
        course_id = %course_id,
        if_match = ?conditional.if_match(),
        "Processing course delete request"
    );

    ensure_author_exists(&state, author_id).await?;

    let stored = state
        .storage()
        .get_course(author_id, course_id)
        .await?
        .ok_or_else(|| RestError::not_found("Course", course_id))?;

    conditional.check_if_match(&stored)?;

    state.storage().delete_course(author_id, course_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
