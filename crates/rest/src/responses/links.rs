//! Hypermedia link generation.
//!
//! All hrefs are absolute, built from the configured base URL. A base URL with
//! a path (`https://example.com/library`) prefixes every generated path.
//!
//! ```
//! use courselib_rest::responses::links::{EntityKind, LinkBuilder};
//! use uuid::Uuid;
//!
//! let links = LinkBuilder::new("http://localhost:8080").unwrap();
//! let id = Uuid::nil();
//!
//! let rels: Vec<_> = links
//!     .entity_links(EntityKind::Author, id, None)
//!     .into_iter()
//!     .map(|l| l.rel)
//!     .collect();
//! assert_eq!(rels, vec!["self", "delete", "create-child", "list-children"]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::extractors::AuthorsParameters;
use crate::extractors::ids::format_id_list;

/// Path of the API root.
pub const API_ROOT: &str = "/api";

/// Path of the author collection.
pub const AUTHORS_PATH: &str = "/api/authors";

/// Path of the author collections resource.
pub const AUTHOR_COLLECTIONS_PATH: &str = "/api/authorcollections";

/// Errors raised while configuring link generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The base URL cannot be parsed or cannot carry a path.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// A named, method-tagged hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL.
    pub href: String,
    /// Relation name, unique within a list.
    pub rel: String,
    /// HTTP method to use.
    pub method: String,
}

impl Link {
    /// Creates a new link.
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

/// Entities that carry hypermedia links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// An author.
    Author,
}

struct Relation {
    rel: &'static str,
    method: &'static str,
    /// Path appended to the entity's own path.
    suffix: &'static str,
}

const AUTHOR_RELATIONS: &[Relation] = &[
    Relation {
        rel: "delete",
        method: "DELETE",
        suffix: "",
    },
    Relation {
        rel: "create-child",
        method: "POST",
        suffix: "courses",
    },
    Relation {
        rel: "list-children",
        method: "GET",
        suffix: "courses",
    },
];

impl EntityKind {
    fn collection_path(self) -> &'static str {
        match self {
            EntityKind::Author => AUTHORS_PATH,
        }
    }

    fn relations(self) -> &'static [Relation] {
        match self {
            EntityKind::Author => AUTHOR_RELATIONS,
        }
    }
}

/// Which page a collection link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// The requested page.
    Current,
    /// The page after it.
    Next,
    /// The page before it.
    Previous,
}

/// Builds absolute links from a base URL.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    /// Creates a builder for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, LinkError> {
        let base = Url::parse(base_url).map_err(|e| LinkError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(LinkError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }
        Ok(Self { base })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url.into()
    }

    /// Absolute URL for a path.
    pub fn href(&self, path: &str) -> String {
        self.url(path, &[])
    }

    /// Absolute URL of an author.
    pub fn author_url(&self, author_id: Uuid) -> String {
        self.href(&format!("{AUTHORS_PATH}/{author_id}"))
    }

    /// Absolute URL of a course.
    pub fn course_url(&self, author_id: Uuid, course_id: Uuid) -> String {
        self.href(&format!("{AUTHORS_PATH}/{author_id}/courses/{course_id}"))
    }

    /// Absolute URL of an author collection.
    pub fn author_collection_url(&self, ids: &[Uuid]) -> String {
        self.href(&format!(
            "{AUTHOR_COLLECTIONS_PATH}/{}",
            format_id_list(ids)
        ))
    }

    /// Links for a single entity: `self` first, then the kind's relations.
    ///
    /// The `self` link carries `fields` when a non-blank selection was given.
    pub fn entity_links(&self, kind: EntityKind, id: Uuid, fields: Option<&str>) -> Vec<Link> {
        let entity_path = format!("{}/{}", kind.collection_path(), id);

        let self_href = match fields.map(str::trim).filter(|f| !f.is_empty()) {
            Some(fields) => self.url(&entity_path, &[("fields", fields)]),
            None => self.href(&entity_path),
        };

        let mut links = Vec::with_capacity(kind.relations().len() + 1);
        links.push(Link::new(self_href, "self", "GET"));
        links.extend(kind.relations().iter().map(|relation| {
            let path = if relation.suffix.is_empty() {
                entity_path.clone()
            } else {
                format!("{entity_path}/{}", relation.suffix)
            };
            Link::new(self.href(&path), relation.rel, relation.method)
        }));
        links
    }

    /// URL of a page of an author list, carrying every list parameter.
    pub fn page_link(
        &self,
        path: &str,
        params: &AuthorsParameters,
        direction: PageDirection,
    ) -> String {
        let page_number = match direction {
            PageDirection::Current => params.page_number,
            PageDirection::Next => params.page_number + 1,
            PageDirection::Previous => params.page_number.saturating_sub(1).max(1),
        };
        let page_number = page_number.to_string();
        let page_size = params.page_size.to_string();

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(6);
        if let Some(fields) = params.fields.as_deref() {
            query.push(("fields", fields));
        }
        query.push(("orderBy", &params.order_by));
        query.push(("pageNumber", &page_number));
        query.push(("pageSize", &page_size));
        if let Some(category) = params.main_category.as_deref() {
            query.push(("mainCategory", category));
        }
        if let Some(search) = params.search_query.as_deref() {
            query.push(("searchQuery", search));
        }

        self.url(path, &query)
    }

    /// Links for a page of a collection.
    ///
    /// `self`, then `next-page` and `previous-page` when those pages exist.
    pub fn collection_links(
        &self,
        path: &str,
        params: &AuthorsParameters,
        has_next: bool,
        has_previous: bool,
    ) -> Vec<Link> {
        let mut links = vec![Link::new(
            self.page_link(path, params, PageDirection::Current),
            "self",
            "GET",
        )];
        if has_next {
            links.push(Link::new(
                self.page_link(path, params, PageDirection::Next),
                "next-page",
                "GET",
            ));
        }
        if has_previous {
            links.push(Link::new(
                self.page_link(path, params, PageDirection::Previous),
                "previous-page",
                "GET",
            ));
        }
        links
    }

    /// Links of the API root document.
    pub fn root_links(&self) -> Vec<Link> {
        vec![
            Link::new(self.href(API_ROOT), "self", "GET"),
            Link::new(self.href(AUTHORS_PATH), "authors", "GET"),
            Link::new(self.href(AUTHORS_PATH), "create-author", "POST"),
        ]
    }
}
