//! Author list parameters extractor.
//!
//! Extracts filtering, search, sorting, paging and field selection for
//! `GET /api/authors`.

use axum::{
    extract::{FromRequestParts, Query},
    http::{Uri, request::Parts},
};
use courselib_persistence::core::LibraryRepository;
use courselib_persistence::types::{AuthorQuery, SortKey};
use serde::Deserialize;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

use super::ordering::parse_order_by;

/// Sort order used when the client does not ask for one.
pub const DEFAULT_ORDER_BY: &str = "name";

/// Axum extractor for author list parameters.
///
/// | Query parameter | Default |
/// |-----------------|---------|
/// | `mainCategory` | none |
/// | `searchQuery` | none |
/// | `pageNumber` | 1 |
/// | `pageSize` | configured default, capped at the configured maximum |
/// | `orderBy` | `name` |
/// | `fields` | all |
///
/// # Example
///
/// ```rust,ignore
/// use courselib_rest::extractors::AuthorsParameters;
///
/// async fn list_handler(params: AuthorsParameters) {
///     let query = params.to_query()?;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorsParameters {
    /// Exact main category filter.
    pub main_category: Option<String>,
    /// Free-text search.
    pub search_query: Option<String>,
    /// 1-based page number.
    pub page_number: usize,
    /// Items per page.
    pub page_size: usize,
    /// Comma-separated sort clauses.
    pub order_by: String,
    /// Comma-separated field selection.
    pub fields: Option<String>,
}

/// Raw query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorsQuery {
    main_category: Option<String>,
    #[serde(alias = "search")]
    search_query: Option<String>,
    page_number: Option<i64>,
    page_size: Option<i64>,
    order_by: Option<String>,
    fields: Option<String>,
}

impl AuthorsParameters {
    /// Creates parameters for the first page with default sorting.
    pub fn new(page_size: usize) -> Self {
        Self {
            main_category: None,
            search_query: None,
            page_number: 1,
            page_size,
            order_by: DEFAULT_ORDER_BY.to_string(),
            fields: None,
        }
    }

    /// Parses the query string of a request URI.
    ///
    /// # Errors
    ///
    /// `BadRequest` if a value has the wrong type, or if a page number or
    /// page size is below 1.
    pub fn from_uri(uri: &Uri, default_page_size: usize, max_page_size: usize) -> RestResult<Self> {
        let Query(raw) = Query::<AuthorsQuery>::try_from_uri(uri)
            .map_err(|e| RestError::bad_request(e.body_text()))?;

        let page_number = match raw.page_number {
            None => 1,
            Some(n) if n >= 1 => n as usize,
            Some(n) => {
                return Err(RestError::bad_request(format!(
                    "pageNumber must be at least 1, got {n}"
                )));
            }
        };

        let page_size = match raw.page_size {
            None => default_page_size,
            Some(n) if n >= 1 => (n as usize).min(max_page_size),
            Some(n) => {
                return Err(RestError::bad_request(format!(
                    "pageSize must be at least 1, got {n}"
                )));
            }
        };

        Ok(Self {
            main_category: non_blank(raw.main_category),
            search_query: non_blank(raw.search_query),
            page_number,
            page_size,
            order_by: non_blank(raw.order_by).unwrap_or_else(|| DEFAULT_ORDER_BY.to_string()),
            fields: non_blank(raw.fields),
        })
    }

    /// Parses `orderBy` into entity sort keys.
    pub fn sort_keys(&self) -> RestResult<Vec<SortKey>> {
        Ok(parse_order_by(&self.order_by)?)
    }

    /// Builds the repository query.
    pub fn to_query(&self) -> RestResult<AuthorQuery> {
        let mut query = AuthorQuery::default().with_page(self.page_number, self.page_size);
        query.main_category = self.main_category.clone();
        query.search = self.search_query.clone();
        query.sort = self.sort_keys()?;
        Ok(query)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<AppState<S>> for AuthorsParameters
where
    S: LibraryRepository + Send + Sync + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        Self::from_uri(&parts.uri, state.default_page_size(), state.max_page_size())
    }
}

/// Axum extractor for the `fields` parameter of a single-entity read.
///
/// A malformed query string is rejected as a `400` problem, like
/// [`AuthorsParameters`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    /// Comma-separated field selection.
    pub fields: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FieldSelectionQuery {
    fields: Option<String>,
}

impl FieldSelection {
    /// Parses the query string of a request URI.
    ///
    /// # Errors
    ///
    /// `BadRequest` if the query string cannot be read, for example when
    /// `fields` is given twice.
    pub fn from_uri(uri: &Uri) -> RestResult<Self> {
        let Query(raw) = Query::<FieldSelectionQuery>::try_from_uri(uri)
            .map_err(|e| RestError::bad_request(e.body_text()))?;
        Ok(Self {
            fields: non_blank(raw.fields),
        })
    }

    /// Returns the selection, if any.
    pub fn as_deref(&self) -> Option<&str> {
        self.fields.as_deref()
    }
}

impl<S> FromRequestParts<S> for FieldSelection
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_uri(&parts.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courselib_persistence::types::AuthorSortField;

    fn parse(query: &str) -> RestResult<AuthorsParameters> {
        let uri: Uri = format!("/api/authors?{query}").parse().unwrap();
        AuthorsParameters::from_uri(&uri, 10, 20)
    }

    #[test]
    fn test_defaults() {
        let uri: Uri = "/api/authors".parse().unwrap();
        let params = AuthorsParameters::from_uri(&uri, 10, 20).unwrap();
        assert_eq!(params, AuthorsParameters::new(10));
    }

    #[test]
    fn test_page_size_capped() {
        let params = parse("pageSize=500&pageNumber=3").unwrap();
        assert_eq!(params.page_size, 20);
        assert_eq!(params.page_number, 3);
    }

    #[test]
    fn test_page_below_one_rejected() {
        assert!(matches!(parse("pageNumber=0"), Err(RestError::BadRequest { .. })));
        assert!(matches!(parse("pageSize=-1"), Err(RestError::BadRequest { .. })));
        assert!(matches!(parse("pageNumber=abc"), Err(RestError::BadRequest { .. })));
    }

    #[test]
    fn test_filters_trimmed_and_blank_dropped() {
        let params = parse("mainCategory=%20Rum%20&searchQuery=&fields=name").unwrap();
        assert_eq!(params.main_category.as_deref(), Some("Rum"));
        assert_eq!(params.search_query, None);
        assert_eq!(params.fields.as_deref(), Some("name"));
    }

    #[test]
    fn test_search_alias() {
        let params = parse("search=bones").unwrap();
        assert_eq!(params.search_query.as_deref(), Some("bones"));
    }

    #[test]
    fn test_to_query() {
        let query = parse("orderBy=age&mainCategory=Rum&pageNumber=2")
            .unwrap()
            .to_query()
            .unwrap();
        assert_eq!(query.page_number, 2);
        assert_eq!(query.main_category.as_deref(), Some("Rum"));
        assert_eq!(query.sort, vec![SortKey::descending(AuthorSortField::DateOfBirth)]);
    }

    #[test]
    fn test_unknown_order_by() {
        let params = parse("orderBy=bogus").unwrap();
        assert!(matches!(params.to_query(), Err(RestError::BadRequest { .. })));
    }

    #[test]
    fn test_field_selection() {
        let uri: Uri = "/api/authors/1?fields=name,age".parse().unwrap();
        let selection = FieldSelection::from_uri(&uri).unwrap();
        assert_eq!(selection.as_deref(), Some("name,age"));

        let uri: Uri = "/api/authors/1?fields=%20".parse().unwrap();
        assert_eq!(FieldSelection::from_uri(&uri).unwrap(), FieldSelection::default());
    }

    #[test]
    fn test_repeated_fields_rejected() {
        let uri: Uri = "/api/authors/1?fields=name&fields=age".parse().unwrap();
        assert!(matches!(
            FieldSelection::from_uri(&uri),
            Err(RestError::BadRequest { .. })
        ));
    }
}
