//! Author collection handlers.
//!
//! A set of authors is addressed by its identifiers:
//! `[base]/api/authorcollections/(id1,id2)`.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courselib_persistence::core::LibraryRepository;
use courselib_persistence::types::{Author, Course};
use tracing::debug;

use crate::dto::CreateAuthorDto;
use crate::error::{RestError, RestResult, ensure_valid};
use crate::extractors::JsonBody;
use crate::extractors::ids::parse_id_list;
use crate::responses::assembler::assemble_author_list;
use crate::responses::headers::ResourceHeaders;
use crate::state::AppState;

/// Handler for reading a set of authors.
///
/// # HTTP Request
///
/// `GET [base]/api/authorcollections/(id1,id2,...)`
///
/// # Response
///
/// - `200 OK` - The authors, in requested order
/// - `400 Bad Request` - Malformed id list
/// - `404 Not Found` - At least one id is unknown
pub async fn get_author_collection_handler<S>(
    State(state): State<AppState<S>>,
    Path(ids): Path<String>,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    let ids = parse_id_list(&ids)?;

    debug!(count = ids.len(), "Processing author collection read request");

    let authors = state.storage().authors_by_ids(&ids).await?;

    if authors.len() != ids.len() {
        let missing = ids
            .iter()
            .find(|id| !authors.iter().any(|a| a.id() == **id))
            .map(ToString::to_string)
            .unwrap_or_default();
        debug!(missing = %missing, "Author collection incomplete");
        return Err(RestError::not_found("Author", missing));
    }

    let body = assemble_author_list(&authors, state.links())?;
    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Handler for creating a set of authors.
///
/// # HTTP Request
///
/// `POST [base]/api/authorcollections`
///
/// The body is a JSON array of author creation documents. Nothing is stored
/// unless every element is valid.
///
/// # Response
///
/// - `201 Created` - The created authors; `Location` addresses the whole set
/// - `400 Bad Request` - Malformed JSON or an empty array
/// - `422 Unprocessable Entity` - Validation failed
pub async fn create_author_collection_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(dtos): JsonBody<Vec<CreateAuthorDto>>,
) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    debug!(count = dtos.len(), "Processing author collection create request");

    if dtos.is_empty() {
        return Err(RestError::bad_request("The author collection is empty"));
    }
    ensure_valid(&dtos)?;

    let mut created = Vec::with_capacity(dtos.len());
    for dto in dtos {
        let (author, courses): (Author, Vec<Course>) = dto.into();
        created.push(state.storage().add_author(author, courses).await?);
    }

    let ids: Vec<_> = created.iter().map(|stored| stored.id()).collect();
    let body = assemble_author_list(&created, state.links())?;
    let headers =
        ResourceHeaders::new().with_location(state.links().author_collection_url(&ids));

    debug!(count = ids.len(), "Author collection created");

    Ok((StatusCode::CREATED, headers.to_header_map(), Json(body)).into_response())
}
