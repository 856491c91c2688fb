//! Author handlers.
//!
//! - `GET|HEAD [base]/api/authors` - paged, filtered, sorted list
//! - `OPTIONS [base]/api/authors` - allowed methods
//! - `POST [base]/api/authors` - create an author, optionally with courses
//! - `GET [base]/api/authors/{authorId}` - negotiated, shaped author
//! - `DELETE [base]/api/authors/{authorId}` - delete an author and its courses

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use courselib_persistence::core::LibraryRepository;
use courselib_persistence::types::{Author, Course};
use tracing::debug;

use crate::dto::{AuthorShape, CreateAuthorDto, CreateAuthorWithDateOfDeathDto};
use crate::error::{RestError, RestResult, ensure_valid};
use crate::extractors::ids::parse_id;
use crate::extractors::{AuthorsParameters, FieldSelection, parse_json};
use crate::middleware::conditional::ConditionalHeaders;
use crate::middleware::content_type::{AuthorCreationFormat, DEFAULT_MEDIA_TYPE, Representation};
use crate::responses::assembler::{assemble_author_as, assemble_author_collection};
use crate::responses::headers::ResourceHeaders;
use crate::state::AppState;

/// Methods allowed on the author collection.
pub const AUTHORS_ALLOW: &str = "GET,OPTIONS,POST";

/// Handler for the author list.
///
/// # HTTP Request
///
/// `GET [base]/api/authors?mainCategory=&searchQuery=&orderBy=&pageNumber=&pageSize=&fields=`
///
/// `HEAD` returns the same headers without a body.
///
/// # Response
///
/// - `200 OK` - `{ value: [...], links: [...] }` with an `X-Pagination` header
/// - `400 Bad Request` - Unknown sort property or field, or invalid paging
pub async fn list_authors_handler<S>(
    State(state): State<AppState<S>>,
    params: AuthorsParameters,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync + 'static,
{
    debug!(
        main_category = ?params.main_category,
        search_query = ?params.search_query,
        order_by = %params.order_by,
        page_number = params.page_number,
        page_size = params.page_size,
        "Processing author list request"
    );

    let query = params.to_query()?;
    let page = state.storage().list_authors(&query).await?;

    let (payload, metadata) = assemble_author_collection(&page, &params, state.links())?;

    debug!(
        total_count = metadata.total_count,
        returned = payload.value.len(),
        "Returning author page"
    );

    let headers = ResourceHeaders::new().with_pagination(&metadata);
    Ok((StatusCode::OK, headers.to_header_map(), Json(payload)).into_response())
}

/// Handler for `OPTIONS` on the author collection.
///
/// # Response
///
/// - `200 OK` - `Allow: GET,OPTIONS,POST`
pub async fn options_authors_handler() -> Response {
    (
        StatusCode::OK,
        [(header::ALLOW, HeaderValue::from_static(AUTHORS_ALLOW))],
    )
        .into_response()
}

/// Handler for reading a single author.
///
/// # HTTP Request
///
/// `GET [base]/api/authors/{authorId}?fields=`
///
/// # Headers
///
/// - `Accept` - Selects the shape and whether links are attached
/// - `If-None-Match` / `If-Modified-Since` - Conditional read
///
/// # Response
///
/// - `200 OK` - The shaped author
/// - `304 Not Modified` - Author unchanged
/// - `400 Bad Request` - Malformed Accept or unknown field
/// - `404 Not Found` - Author does not exist
pub async fn get_author_handler<S>(
    State(state): State<AppState<S>>,
    Path(author_id): Path<String>,
    selection: FieldSelection,
    conditional: ConditionalHeaders,
    headers: HeaderMap,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let representation =
        Representation::from_headers(&headers).map_err(|e| RestError::bad_request(e.to_string()))?;
    let author_id = parse_id(&author_id)?;
    let fields = selection.as_deref();

    debug!(
        author_id = %author_id,
        media_type = %representation.media_type,
        fields = ?fields,
        "Processing author read request"
    );

    let stored = state
        .storage()
        .get_author(author_id)
        .await?
        .ok_or_else(|| RestError::not_found("Author", author_id))?;

    // Field errors win over a conditional match.
    let shaped = assemble_author_as(stored.value(), &representation, fields, state.links())?;

    if conditional.is_not_modified(&stored) {
        debug!(etag = %stored.etag(), "Returning 304 Not Modified");
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let headers = ResourceHeaders::from_stored(&stored)
        .with_content_type(representation.response_content_type());

    Ok((StatusCode::OK, headers.to_header_map(), Json(shaped)).into_response())
}

/// Handler for creating an author.
///
/// # HTTP Request
///
/// `POST [base]/api/authors`
///
/// # Headers
///
/// - `Content-Type`:
///   - `application/json` or `application/vnd.marvin.authorforcreation+json`
///   - `application/vnd.marvin.authorforcreationwithdateofdeath+json`
///
/// # Response
///
/// - `201 Created` - Friendly author with links, `Location` header
/// - `400 Bad Request` - Malformed JSON
/// - `415 Unsupported Media Type` - Unknown Content-Type
/// - `422 Unprocessable Entity` - Validation failed
pub async fn create_author_handler<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let format = AuthorCreationFormat::from_headers(&headers)?;

    debug!(format = ?format, "Processing author create request");

    let (author, courses): (Author, Vec<Course>) = match format {
        AuthorCreationFormat::Standard => {
            let dto: CreateAuthorDto = parse_json(&body)?;
            ensure_valid(&dto)?;
            dto.into()
        }
        AuthorCreationFormat::WithDateOfDeath => {
            let dto: CreateAuthorWithDateOfDeathDto = parse_json(&body)?;
            ensure_valid(&dto)?;
            dto.into()
        }
    };

    let course_count = courses.len();
    let stored = state.storage().add_author(author, courses).await?;
    let author_id = stored.id();

    debug!(author_id = %author_id, courses = course_count, "Author created");

    let representation = Representation {
        shape: AuthorShape::Friendly,
        include_links: true,
        media_type: DEFAULT_MEDIA_TYPE.to_string(),
    };
    let shaped = assemble_author_as(stored.value(), &representation, None, state.links())?;

    let headers =
        ResourceHeaders::from_stored(&stored).with_location(state.links().author_url(author_id));

    Ok((StatusCode::CREATED, headers.to_header_map(), Json(shaped)).into_response())
}

/// Handler for deleting an author.
///
/// The author's courses are deleted with it.
///
/// # HTTP Request
///
/// `DELETE [base]/api/authors/{authorId}`
///
/// # Response
///
/// - `204 No Content` - Author deleted
/// - `404 Not Found` - Author does not exist
pub async fn delete_author_handler<S>(
    State(state): State<AppState<S>>,
    Path(author_id): Path<String>,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let author_id = parse_id(&author_id)?;

    debug!(author_id = %author_id, "Processing author delete request");

    state.storage().delete_author(author_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
