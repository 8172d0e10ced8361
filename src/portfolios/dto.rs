use serde::{Deserialize, Serialize};

/// Cursor page: a window of rows plus a has-more flag, no total count.
#[derive(Debug, Serialize)]
pub struct Slice<T> {
    pub content: Vec<T>,
    pub has_next: bool,
}

impl<T> Slice<T> {
    /// Builds a slice from rows fetched with `LIMIT size + 1`: the extra
    /// row only signals that another page exists and is dropped.
    pub fn from_rows(mut rows: Vec<T>, size: i64) -> Self {
        let has_next = rows.len() as i64 > size;
        if has_next {
            rows.truncate(size as usize);
        }
        Self {
            content: rows,
            has_next,
        }
    }
}

/// Offset page with totals, for the search path.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, page: i64, size: i64) -> Self {
        let total_pages = if size > 0 {
            (total_elements + size - 1) / size
        } else {
            0
        };
        Self {
            content,
            total_elements,
            total_pages,
            page,
            size,
        }
    }
}

fn default_size() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct SliceParams {
    /// Cursor: only portfolios with a smaller id are returned. Clients
    /// bootstrap it from the next-id endpoint.
    #[serde(rename = "last-portfolio-id")]
    pub last_portfolio_id: Option<i64>,
    #[serde(default = "default_size")]
    pub size: i64,
    pub category: Option<String>,
    pub filter: Option<String>,
}

impl SliceParams {
    /// Query strings can carry any integer; a negative size would leak
    /// into `LIMIT` and fail at the database, so it is floored at zero.
    pub fn size(&self) -> i64 {
        self.size.max(0)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: String,
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

impl SearchParams {
    pub fn page(&self) -> i64 {
        self.page.max(0)
    }

    pub fn size(&self) -> i64 {
        self.size.max(0)
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_drops_sentinel_row_and_flags_more() {
        let slice = Slice::from_rows(vec![1, 2, 3, 4], 3);
        assert_eq!(slice.content, vec![1, 2, 3]);
        assert!(slice.has_next);
    }

    #[test]
    fn slice_without_overflow_has_no_next() {
        let slice = Slice::from_rows(vec![1, 2], 3);
        assert_eq!(slice.content, vec![1, 2]);
        assert!(!slice.has_next);
    }

    #[test]
    fn empty_slice() {
        let slice = Slice::<i64>::from_rows(vec![], 10);
        assert!(slice.content.is_empty());
        assert!(!slice.has_next);
    }

    #[test]
    fn page_totals_round_up() {
        let page = Page::new(vec![1, 2, 3], 7, 0, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 7);
    }

    #[test]
    fn page_of_exact_multiple() {
        let page = Page::new(vec![1, 2], 6, 2, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_page_has_zero_pages() {
        let page = Page::<i64>::new(vec![], 0, 0, 10);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn negative_slice_size_is_floored_at_zero() {
        let params = SliceParams {
            last_portfolio_id: None,
            size: -5,
            category: None,
            filter: None,
        };
        assert_eq!(params.size(), 0);
    }

    #[test]
    fn negative_search_page_and_size_are_floored_at_zero() {
        let params = SearchParams {
            keyword: "rust".into(),
            page: -1,
            size: -20,
        };
        assert_eq!(params.page(), 0);
        assert_eq!(params.size(), 0);
    }

    #[test]
    fn positive_params_pass_through_unchanged() {
        let params = SearchParams {
            keyword: "rust".into(),
            page: 2,
            size: 15,
        };
        assert_eq!(params.page(), 2);
        assert_eq!(params.size(), 15);
    }
}
