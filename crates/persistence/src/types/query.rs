//! Author list queries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::entity::Author;

/// Entity-level fields authors can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorSortField {
    /// The author's identifier.
    Id,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Date of birth.
    DateOfBirth,
    /// Main category.
    MainCategory,
}

impl AuthorSortField {
    /// Compares two authors on this field, ascending.
    pub fn compare(&self, a: &Author, b: &Author) -> Ordering {
        match self {
            AuthorSortField::Id => a.id.cmp(&b.id),
            AuthorSortField::FirstName => a.first_name.cmp(&b.first_name),
            AuthorSortField::LastName => a.last_name.cmp(&b.last_name),
            AuthorSortField::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            AuthorSortField::MainCategory => a.main_category.cmp(&b.main_category),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending (default).
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One key of a multi-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    /// The field to sort by.
    pub field: AuthorSortField,
    /// The direction.
    pub direction: SortDirection,
}

impl SortKey {
    /// Creates an ascending sort key.
    pub fn ascending(field: AuthorSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Creates a descending sort key.
    pub fn descending(field: AuthorSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Compares two authors on this key.
    pub fn compare(&self, a: &Author, b: &Author) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Filtering, sorting and paging for an author list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorQuery {
    /// Exact main category filter.
    pub main_category: Option<String>,

    /// Free-text search over first name, last name and main category.
    pub search: Option<String>,

    /// Sort keys, applied in order; ties keep insertion order.
    pub sort: Vec<SortKey>,

    /// 1-based page number.
    pub page_number: usize,

    /// Items per page.
    pub page_size: usize,
}

impl Default for AuthorQuery {
    fn default() -> Self {
        Self {
            main_category: None,
            search: None,
            sort: Vec::new(),
            page_number: 1,
            page_size: 10,
        }
    }
}

impl AuthorQuery {
    /// Sets the main category filter.
    pub fn with_main_category(mut self, category: impl Into<String>) -> Self {
        self.main_category = Some(category.into());
        self
    }

    /// Sets the free-text search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Appends a sort key.
    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Sets the page.
    pub fn with_page(mut self, page_number: usize, page_size: usize) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    /// Returns true if the author passes the category filter and search.
    ///
    /// Both values are trimmed; blank values do not filter.
    pub fn matches(&self, author: &Author) -> bool {
        if let Some(category) = non_blank(self.main_category.as_deref()) {
            if author.main_category != category {
                return false;
            }
        }

        if let Some(search) = non_blank(self.search.as_deref()) {
            return author.main_category.contains(search)
                || author.first_name.contains(search)
                || author.last_name.contains(search);
        }

        true
    }

    /// Compares two authors on all sort keys in turn.
    pub fn compare(&self, a: &Author, b: &Author) -> Ordering {
        self.sort
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
