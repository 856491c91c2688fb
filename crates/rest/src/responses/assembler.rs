//! Resource assembly.
//!
//! Turns stored authors into response bodies: negotiate the representation,
//! validate the field selection, map to the shape's DTO, project, and attach
//! hypermedia links.

use courselib_persistence::types::{Author, PagedList, StoredEntity};
use serde::Serialize;

use crate::dto::{AuthorShape, map_author};
use crate::error::{RestError, RestResult};
use crate::extractors::AuthorsParameters;
use crate::middleware::content_type::{DEFAULT_MEDIA_TYPE, Representation};

use super::links::{AUTHORS_PATH, EntityKind, Link, LinkBuilder, PageDirection};
use super::shaping::{FieldSpec, LINKS_KEY, ShapedObject, project};

/// Body of a paged author list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionPayload {
    /// The shaped items, each with its own links.
    pub value: Vec<ShapedObject>,
    /// Links of the collection page.
    pub links: Vec<Link>,
}

/// Content of the `X-Pagination` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Number of matching authors across all pages.
    pub total_count: usize,
    /// Items per page.
    pub page_size: usize,
    /// 1-based page number.
    pub current_page: usize,
    /// `ceil(total_count / page_size)`.
    pub total_pages: usize,
    /// Link to the previous page, if there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_link: Option<String>,
    /// Link to the next page, if there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_link: Option<String>,
}

fn attach_links(shaped: &mut ShapedObject, links: Vec<Link>) -> RestResult<()> {
    let links = serde_json::to_value(links).map_err(|e| RestError::InternalError {
        message: format!("failed to serialize links: {e}"),
    })?;
    shaped.insert(LINKS_KEY, links);
    Ok(())
}

/// Assembles an author for a raw `Accept` value.
///
/// # Errors
///
/// `BadRequest` if the media type cannot be parsed or a requested field does
/// not exist on the negotiated shape.
pub fn assemble_author(
    author: &Author,
    accept: &str,
    fields: Option<&str>,
    links: &LinkBuilder,
) -> RestResult<ShapedObject> {
    let representation =
        Representation::resolve(accept).map_err(|e| RestError::bad_request(e.to_string()))?;
    assemble_author_as(author, &representation, fields, links)
}

/// Assembles an author in an already negotiated representation.
pub fn assemble_author_as(
    author: &Author,
    representation: &Representation,
    fields: Option<&str>,
    links: &LinkBuilder,
) -> RestResult<ShapedObject> {
    let spec = FieldSpec::parse(fields)?;
    spec.resolve(representation.shape.shape_id())?;

    let dto = map_author(author, representation.shape);
    let mut shaped = project(&dto, &spec)?;

    if representation.include_links {
        attach_links(
            &mut shaped,
            links.entity_links(EntityKind::Author, author.id, fields),
        )?;
    }

    Ok(shaped)
}

/// Assembles a page of authors and its pagination metadata.
///
/// Items use the friendly shape and carry their own links. The collection
/// carries `self` and, where they exist, `next-page` and `previous-page`.
///
/// # Errors
///
/// `BadRequest` for an unknown sort property or field.
pub fn assemble_author_collection(
    page: &PagedList<StoredEntity<Author>>,
    params: &AuthorsParameters,
    links: &LinkBuilder,
) -> RestResult<(CollectionPayload, PaginationMetadata)> {
    params.sort_keys()?;
    let spec = FieldSpec::parse(params.fields.as_deref())?;
    spec.resolve(AuthorShape::Friendly.shape_id())?;

    let mut value = Vec::with_capacity(page.items().len());
    for stored in page.items() {
        let author = stored.value();
        let mut shaped = project(&map_author(author, AuthorShape::Friendly), &spec)?;
        attach_links(
            &mut shaped,
            links.entity_links(EntityKind::Author, author.id, None),
        )?;
        value.push(shaped);
    }

    let has_next = page.has_next();
    let has_previous = page.has_previous();

    let metadata = PaginationMetadata {
        total_count: page.total_count(),
        page_size: page.page_size(),
        current_page: page.current_page(),
        total_pages: page.total_pages(),
        previous_page_link: has_previous
            .then(|| links.page_link(AUTHORS_PATH, params, PageDirection::Previous)),
        next_page_link: has_next.then(|| links.page_link(AUTHORS_PATH, params, PageDirection::Next)),
    };

    let payload = CollectionPayload {
        value,
        links: links.collection_links(AUTHORS_PATH, params, has_next, has_previous),
    };

    Ok((payload, metadata))
}

/// Assembles authors as a bare array in the friendly shape, without links.
pub fn assemble_author_list(
    authors: &[StoredEntity<Author>],
    links: &LinkBuilder,
) -> RestResult<Vec<ShapedObject>> {
    let representation = Representation {
        shape: AuthorShape::Friendly,
        include_links: false,
        media_type: DEFAULT_MEDIA_TYPE.to_string(),
    };
    authors
        .iter()
        .map(|stored| assemble_author_as(stored.value(), &representation, None, links))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::Value;
    use uuid::Uuid;

    fn links() -> LinkBuilder {
        LinkBuilder::new("http://localhost:8080").unwrap()
    }

    fn ada() -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: DateTime::parse_from_rfc3339("1815-12-10T00:00:00+00:00").unwrap(),
            date_of_death: DateTime::parse_from_rfc3339("1852-11-27T00:00:00+00:00").ok(),
            main_category: "Maths".to_string(),
        }
    }

    fn authors(count: usize) -> Vec<StoredEntity<Author>> {
        (0..count)
            .map(|i| {
                let mut author = ada();
                author.first_name = format!("Ada{i:02}");
                StoredEntity::new(author)
            })
            .collect()
    }

    // ========================================================================
    // Single author
    // ========================================================================

    #[test]
    fn test_full_shape_with_field_selection() {
        let shaped = assemble_author(
            &ada(),
            "application/vnd.marvin.author.full+json",
            Some("FirstName"),
            &links(),
        )
        .unwrap();

        assert_eq!(shaped.keys().collect::<Vec<_>>(), vec!["firstName"]);
        assert_eq!(shaped.get("firstName").cloned(), Some(Value::from("Ada")));
    }

    #[test]
    fn test_friendly_shape_without_links() {
        let shaped = assemble_author(&ada(), "application/json", None, &links()).unwrap();
        assert_eq!(
            shaped.keys().collect::<Vec<_>>(),
            vec!["id", "name", "age", "mainCategory"]
        );
        assert_eq!(shaped.get("name").cloned(), Some(Value::from("Ada Lovelace")));
        assert_eq!(shaped.get("age").cloned(), Some(Value::from(36)));
    }

    #[test]
    fn test_hateoas_attaches_links_last() {
        let author = ada();
        let shaped = assemble_author(
            &author,
            "application/vnd.marvin.hateoas+json",
            Some("name"),
            &links(),
        )
        .unwrap();

        assert_eq!(shaped.keys().collect::<Vec<_>>(), vec!["name", "links"]);
        let self_href = &shaped.get("links").unwrap()[0]["href"];
        assert_eq!(
            self_href,
            &Value::from(format!(
                "http://localhost:8080/api/authors/{}?fields=name",
                author.id
            ))
        );
    }

    #[test]
    fn test_field_checked_against_negotiated_shape() {
        let err = assemble_author(
            &ada(),
            "application/vnd.marvin.author.full+json",
            Some("age"),
            &links(),
        )
        .unwrap_err();
        assert!(matches!(err, RestError::BadRequest { .. }));
    }

    #[test]
    fn test_unparsable_accept() {
        let err = assemble_author(&ada(), "not a media type", None, &links()).unwrap_err();
        assert!(matches!(err, RestError::BadRequest { .. }));
    }

    // ========================================================================
    // Collection
    // ========================================================================

    #[test]
    fn test_collection_middle_page() {
        let page = PagedList::create(authors(25), 2, 10);
        let mut params = AuthorsParameters::new(10);
        params.page_number = 2;

        let (payload, metadata) = assemble_author_collection(&page, &params, &links()).unwrap();

        assert_eq!(payload.value.len(), 10);
        assert_eq!(metadata.total_pages, 3);
        assert_eq!(metadata.total_count, 25);
        assert!(metadata.next_page_link.as_deref().unwrap().contains("pageNumber=3"));
        assert!(
            metadata
                .previous_page_link
                .as_deref()
                .unwrap()
                .contains("pageNumber=1")
        );

        let rels: Vec<_> = payload.links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "next-page", "previous-page"]);
        assert!(payload.value.iter().all(|item| item.contains_key("links")));
    }

    #[test]
    fn test_collection_metadata_omits_missing_links() {
        let page = PagedList::create(authors(3), 1, 10);
        let params = AuthorsParameters::new(10);

        let (_, metadata) = assemble_author_collection(&page, &params, &links()).unwrap();
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["totalPages"], 1);
        assert!(json.get("nextPageLink").is_none());
        assert!(json.get("previousPageLink").is_none());
    }

    #[test]
    fn test_collection_field_selection() {
        let page = PagedList::create(authors(2), 1, 10);
        let mut params = AuthorsParameters::new(10);
        params.fields = Some("id,name".to_string());

        let (payload, _) = assemble_author_collection(&page, &params, &links()).unwrap();
        assert_eq!(
            payload.value[0].keys().collect::<Vec<_>>(),
            vec!["id", "name", "links"]
        );
    }

    #[test]
    fn test_collection_rejects_unknown_sort() {
        let page = PagedList::create(authors(2), 1, 10);
        let mut params = AuthorsParameters::new(10);
        params.order_by = "height".to_string();

        let err = assemble_author_collection(&page, &params, &links()).unwrap_err();
        assert!(matches!(err, RestError::BadRequest { .. }));
    }

    #[test]
    fn test_author_list_is_plain() {
        let list = assemble_author_list(&authors(2), &links()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(!list[1].contains_key("links"));
        assert_eq!(list[1].get("name").cloned(), Some(Value::from("Ada01 Lovelace")));
    }
}
