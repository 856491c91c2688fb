//! # courselib-rest - Course Library REST API
//!
//! This crate serves a library of authors and their courses over HTTP. Author
//! reads are content-negotiated and can be trimmed to a subset of fields;
//! hypermedia links describe what a client can do next.
//!
//! ## Features
//!
//! - **Field Selection**: `?fields=name,mainCategory` on author reads and lists
//! - **Content Negotiation**: Vendor media types pick the author shape and links
//! - **Paging, Filtering, Sorting**: `pageNumber`, `pageSize`, `mainCategory`,
//!   `searchQuery`, `orderBy`, with an `X-Pagination` header
//! - **Hypermedia**: `self`, `delete`, `create-child`, `list-children`,
//!   `next-page`, `previous-page` links
//! - **Caching**: ETag, Last-Modified, Cache-Control, conditional reads and writes
//! - **Upsert**: PUT and JSON Patch on courses create missing courses
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courselib_rest::{create_app_with_config, ServerConfig};
//! use courselib_persistence::backends::memory::InMemoryRepository;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repository = InMemoryRepository::with_seed_data();
//!     let config = ServerConfig::default();
//!
//!     let app = create_app_with_config(repository, config)?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | root | GET | `/api` |
//! | list authors | GET, HEAD | `/api/authors` |
//! | create author | POST | `/api/authors` |
//! | allowed methods | OPTIONS | `/api/authors` |
//! | read author | GET | `/api/authors/{authorId}` |
//! | delete author | DELETE | `/api/authors/{authorId}` |
//! | read authors | GET | `/api/authorcollections/({ids})` |
//! | create authors | POST | `/api/authorcollections` |
//! | list courses | GET | `/api/authors/{authorId}/courses` |
//! | create course | POST | `/api/authors/{authorId}/courses` |
//! | read course | GET | `/api/authors/{authorId}/courses/{courseId}` |
//! | replace course | PUT | `/api/authors/{authorId}/courses/{courseId}` |
//! | patch course | PATCH | `/api/authors/{authorId}/courses/{courseId}` |
//! | delete course | DELETE | `/api/authors/{authorId}/courses/{courseId}` |
//! | health | GET | `/health` |
//!
//! ## Media Types
//!
//! | Accept | Shape | Links |
//! |--------|-------|-------|
//! | `application/json` | friendly | no |
//! | `application/vnd.marvin.hateoas+json` | friendly | yes |
//! | `application/vnd.marvin.author.full+json` | full | no |
//! | `application/vnd.marvin.author.full.hateoas+json` | full | yes |
//!
//! ## Error Handling
//!
//! All errors are returned as RFC 7807 problem details
//! (`application/problem+json`):
//!
//! | HTTP Status | Meaning |
//! |-------------|---------|
//! | 400 | Malformed request, unknown field or sort property |
//! | 404 | Author or course not found |
//! | 409 | Identifier clash |
//! | 412 | If-Match did not match |
//! | 415 | Unsupported Content-Type |
//! | 422 | Validation failed |
//! | 500 | Internal server error |
//!
//! ## Configuration
//!
//! The server is configured via command line or environment variables; see
//! [`ServerConfig`].
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LIBRARY_SERVER_PORT` | 8080 | Server port |
//! | `LIBRARY_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `LIBRARY_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `LIBRARY_BASE_URL` | http://localhost:8080 | Base of generated links |
//! | `LIBRARY_DEFAULT_PAGE_SIZE` | 10 | Author page size |
//! | `LIBRARY_MAX_PAGE_SIZE` | 20 | Largest author page size |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and problem details
//! - [`config`] - Server configuration
//! - [`state`] - Application state (repository, configuration, links)
//! - [`dto`] - Transfer shapes, mapping and validation
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Content negotiation and conditional headers
//! - [`extractors`] - Axum extractors for list parameters, ids and bodies
//! - [`responses`] - Field selection, links, assembly and headers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use responses::links::LinkError;
pub use state::AppState;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, header},
};
use courselib_persistence::core::LibraryRepository;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::responses::headers::X_PAGINATION;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
///
/// # Example
///
/// ```rust,ignore
/// use courselib_rest::create_app;
/// use courselib_persistence::backends::memory::InMemoryRepository;
///
/// let app = create_app(InMemoryRepository::with_seed_data())?;
/// ```
pub fn create_app<S>(storage: S) -> Result<Router, LinkError>
where
    S: LibraryRepository + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// This function sets up the complete API with all handlers, middleware,
/// and configuration.
///
/// # Errors
///
/// Fails if the configured base URL cannot be used to build links.
///
/// # Example
///
/// ```rust,ignore
/// use courselib_rest::{create_app_with_config, ServerConfig};
/// use courselib_persistence::backends::memory::InMemoryRepository;
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(InMemoryRepository::new(), config)?;
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Result<Router, LinkError>
where
    S: LibraryRepository + Send + Sync + 'static,
{
    info!(
        backend = storage.backend_name(),
        base_url = %config.base_url,
        "Creating course library API"
    );

    // Create application state
    let state = AppState::new(Arc::new(storage), config.clone())?;

    // Build the router with all routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Add request ID tracking if enabled
    let router = if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    };

    // Apply remaining middleware
    Ok(router.layer(service_builder))
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    // Let browsers read the caching and paging headers
    let exposed: [HeaderName; 4] = [
        header::ETAG,
        header::LAST_MODIFIED,
        header::LOCATION,
        X_PAGINATION,
    ];
    cors.expose_headers(exposed)
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "courselib_rest={level},courselib_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
