//! API root document.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use courselib_persistence::core::LibraryRepository;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the API root.
///
/// Lists the entry points of the API as links.
///
/// # HTTP Request
///
/// `GET [base]/api`
///
/// # Response
///
/// - `200 OK` - An array of links
pub async fn root_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: LibraryRepository + Send + Sync,
{
    debug!("Processing root request");

    Ok(Json(state.links().root_links()).into_response())
}
