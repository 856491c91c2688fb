//! Page-based result lists.

use serde::Serialize;

/// One page of a larger, filtered and sorted result set.
///
/// Pages are 1-based. `total_pages` is `ceil(total_count / page_size)`.
///
/// # Examples
///
/// ```
/// use courselib_persistence::types::PagedList;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let page = PagedList::create(items, 2, 10);
///
/// assert_eq!(page.total_pages(), 3);
/// assert_eq!(page.items(), &[11, 12, 13, 14, 15, 16, 17, 18, 19, 20]);
/// assert!(page.has_next());
/// assert!(page.has_previous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedList<T> {
    items: Vec<T>,
    current_page: usize,
    page_size: usize,
    total_count: usize,
    total_pages: usize,
}

impl<T> PagedList<T> {
    /// Builds a page from an already-fetched slice and the total count.
    ///
    /// A page size of zero yields zero total pages.
    pub fn new(items: Vec<T>, total_count: usize, current_page: usize, page_size: usize) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            items,
            current_page,
            page_size,
            total_count,
            total_pages,
        }
    }

    /// Cuts page `page_number` of `page_size` items out of the full result set.
    pub fn create(source: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let total_count = source.len();
        let skip = page_number.saturating_sub(1).saturating_mul(page_size);
        let items = source.into_iter().skip(skip).take(page_size).collect();
        Self::new(items, total_count, page_number, page_size)
    }

    /// Returns the items on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes self and returns the items on this page.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the 1-based number of this page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the requested page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the number of items across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns the number of pages.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns true if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Maps the items on this page, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = PagedList::create((1..=25).collect::<Vec<_>>(), 1, 10);
        assert_eq!(page.items().len(), 10);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_partial_page() {
        let page = PagedList::create((1..=25).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_exact_multiple() {
        let page = PagedList::create((1..=20).collect::<Vec<_>>(), 1, 10);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_empty_source() {
        let page = PagedList::create(Vec::<u8>::new(), 1, 10);
        assert_eq!(page.total_pages(), 0);
        assert!(page.items().is_empty());
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_page_past_end() {
        let page = PagedList::create((1..=5).collect::<Vec<_>>(), 4, 2);
        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = PagedList::create((1..=25).collect::<Vec<_>>(), 2, 10).map(|n| n * 2);
        assert_eq!(page.items()[0], 22);
        assert_eq!(page.total_count(), 25);
        assert_eq!(page.current_page(), 2);
    }
}
