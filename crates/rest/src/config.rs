//! Server configuration for the Course Library API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LIBRARY_SERVER_PORT` | 8080 | Server port |
//! | `LIBRARY_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `LIBRARY_LOG_LEVEL` | info | Log level |
//! | `LIBRARY_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `LIBRARY_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `LIBRARY_ENABLE_CORS` | true | Enable CORS |
//! | `LIBRARY_CORS_ORIGINS` | * | Allowed origins |
//! | `LIBRARY_CORS_METHODS` | GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `LIBRARY_CORS_HEADERS` | Content-Type,Accept,If-Match,If-None-Match,If-Modified-Since | Allowed headers |
//! | `LIBRARY_BASE_URL` | http://localhost:8080 | Base URL for links and Location headers |
//! | `LIBRARY_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `LIBRARY_DEFAULT_PAGE_SIZE` | 10 | Page size when none is requested |
//! | `LIBRARY_MAX_PAGE_SIZE` | 20 | Upper bound for requested page sizes |
//! | `LIBRARY_CACHE_MAX_AGE` | 60 | `max-age` for cacheable collections (seconds) |
//! | `LIBRARY_COURSE_CACHE_MAX_AGE` | 1000 | `max-age` for a single course (seconds) |
//! | `LIBRARY_SEED_DATA` | true | Start with demo authors and courses |
//!
//! # Example
//!
//! ```rust
//! use courselib_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use clap::Parser;
use url::Url;

/// Server configuration for the Course Library API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "courselib")]
#[command(about = "Course Library REST API Server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "LIBRARY_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "LIBRARY_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "LIBRARY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "LIBRARY_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "LIBRARY_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "LIBRARY_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "LIBRARY_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "LIBRARY_CORS_METHODS",
        default_value = "GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "LIBRARY_CORS_HEADERS",
        default_value = "Content-Type,Accept,If-Match,If-None-Match,If-Modified-Since"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in links and Location headers).
    #[arg(long, env = "LIBRARY_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Enable request ID tracking.
    #[arg(long, env = "LIBRARY_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,

    /// Default page size for author lists.
    #[arg(long, env = "LIBRARY_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,

    /// Maximum page size for author lists.
    #[arg(long, env = "LIBRARY_MAX_PAGE_SIZE", default_value = "20")]
    pub max_page_size: usize,

    /// `max-age` in seconds for cacheable collection responses.
    #[arg(long, env = "LIBRARY_CACHE_MAX_AGE", default_value = "60")]
    pub cache_max_age: u64,

    /// `max-age` in seconds for a single course.
    #[arg(long, env = "LIBRARY_COURSE_CACHE_MAX_AGE", default_value = "1000")]
    pub course_cache_max_age: u64,

    /// Populate the repository with demo data at startup.
    #[arg(long, env = "LIBRARY_SEED_DATA", default_value = "true")]
    pub seed_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept,If-Match,If-None-Match,If-Modified-Since"
                .to_string(),
            base_url: "http://localhost:8080".to_string(),
            enable_request_id: true,
            default_page_size: 10,
            max_page_size: 20,
            cache_max_age: 60,
            course_cache_max_age: 1000,
            seed_data: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        match Url::parse(&self.base_url) {
            Ok(url) if url.cannot_be_a_base() => {
                errors.push(format!("Base URL cannot be a base: {}", self.base_url));
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("Invalid base URL '{}': {}", self.base_url, e)),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, an empty repository and disables features
    /// that might interfere with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            enable_request_id: false,
            default_page_size: 10,
            max_page_size: 20,
            cache_max_age: 60,
            course_cache_max_age: 1000,
            seed_data: false,
        }
    }
}
