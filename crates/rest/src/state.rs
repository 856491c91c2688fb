//! Application state for the course library API.
//!
//! This module defines the shared application state that is available to all
//! request handlers. It includes the repository, configuration, and the link
//! builder derived from the configured base URL.

use std::sync::Arc;

use courselib_persistence::core::LibraryRepository;

use crate::config::ServerConfig;
use crate::responses::links::{LinkBuilder, LinkError};

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The repository type (must implement [`LibraryRepository`])
///
/// # Example
///
/// ```rust,ignore
/// use courselib_rest::{AppState, ServerConfig};
/// use courselib_persistence::backends::memory::InMemoryRepository;
/// use std::sync::Arc;
///
/// let repository = InMemoryRepository::with_seed_data();
/// let state = AppState::new(Arc::new(repository), ServerConfig::default())?;
/// ```
pub struct AppState<S> {
    /// The repository.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Link builder for the configured base URL.
    links: Arc<LinkBuilder>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            links: Arc::clone(&self.links),
        }
    }
}

impl<S: LibraryRepository> AppState<S> {
    /// Creates a new AppState with the given repository and configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured base URL cannot be used to build links.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Result<Self, LinkError> {
        let links = LinkBuilder::new(&config.base_url)?;
        Ok(Self {
            storage,
            config: Arc::new(config),
            links: Arc::new(links),
        })
    }

    /// Returns a reference to the repository.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the repository Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the link builder.
    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the default page size for author lists.
    pub fn default_page_size(&self) -> usize {
        self.config.default_page_size
    }

    /// Returns the maximum page size for author lists.
    pub fn max_page_size(&self) -> usize {
        self.config.max_page_size
    }

    /// Returns the `max-age` for cacheable collections.
    pub fn cache_max_age(&self) -> u64 {
        self.config.cache_max_age
    }

    /// Returns the `max-age` for a single course.
    pub fn course_cache_max_age(&self) -> u64 {
        self.config.course_cache_max_age
    }
}
