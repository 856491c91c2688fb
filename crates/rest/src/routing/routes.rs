//! Route configuration.
//!
//! Defines all routes of the course library API.

use axum::{
    Router,
    routing::{get, post},
};
use courselib_persistence::core::LibraryRepository;

use crate::handlers;
use crate::state::AppState;

/// Creates all course library API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
/// - `GET /api` - Root links
///
/// ## Authors
/// - `GET|HEAD /api/authors` - Paged list
/// - `POST /api/authors` - Create
/// - `OPTIONS /api/authors` - Allowed methods
/// - `GET /api/authors/{authorId}` - Read
/// - `DELETE /api/authors/{authorId}` - Delete
///
/// ## Author collections
/// - `POST /api/authorcollections` - Create many
/// - `GET /api/authorcollections/({ids})` - Read many
///
/// ## Courses
/// - `GET /api/authors/{authorId}/courses` - List
/// - `POST /api/authors/{authorId}/courses` - Create
/// - `GET /api/authors/{authorId}/courses/{courseId}` - Read
/// - `PUT /api/authors/{authorId}/courses/{courseId}` - Replace or create
/// - `PATCH /api/authors/{authorId}/courses/{courseId}` - Patch or create
/// - `DELETE /api/authors/{authorId}/courses/{courseId}` - Delete
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: LibraryRepository + Send + Sync + 'static,
{
    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/api", get(handlers::root_handler::<S>))
        // Authors
        .route(
            "/api/authors",
            get(handlers::list_authors_handler::<S>)
                .post(handlers::create_author_handler::<S>)
                .options(handlers::options_authors_handler),
        )
        .route(
            "/api/authors/{author_id}",
            get(handlers::get_author_handler::<S>).delete(handlers::delete_author_handler::<S>),
        )
        // Author collections
        .route(
            "/api/authorcollections",
            post(handlers::create_author_collection_handler::<S>),
        )
        .route(
            "/api/authorcollections/{ids}",
            get(handlers::get_author_collection_handler::<S>),
        )
        // Courses
        .route(
            "/api/authors/{author_id}/courses",
            get(handlers::list_courses_handler::<S>).post(handlers::create_course_handler::<S>),
        )
        .route(
            "/api/authors/{author_id}/courses/{course_id}",
            get(handlers::get_course_handler::<S>)
                .put(handlers::update_course_handler::<S>)
                .patch(handlers::patch_course_handler::<S>)
                .delete(handlers::delete_course_handler::<S>),
        )
        // State
        .with_state(state)
}
