//! Pagination and sort query parameters for REST listings

use serde::{Deserialize, Serialize};

use crate::db::sort::{SortOrder, filter_sort};
use crate::error::{Error, Result};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw query parameters: `?page=0&size=20&sort=title,desc`
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

/// Validated paging request ready for the repository layer
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub offset: i64,
    pub sort: SortOrder,
}

impl PageParams {
    /// Validate paging bounds and resolve the sort against a whitelist.
    /// Out-of-range page or size is a validation error; a non-whitelisted
    /// sort field is silently dropped.
    pub fn resolve(&self, allowed: &[(&'static str, &'static str)]) -> Result<PageRequest> {
        let page = self.page.unwrap_or(0);
        if page < 0 {
            return Err(Error::Validation("Page must not be negative".to_string()));
        }

        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(Error::Validation(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        // page comes straight off the query string, so the window must be
        // computed without overflow
        let offset = page
            .checked_mul(size)
            .ok_or_else(|| Error::Validation("Page is out of range".to_string()))?;

        Ok(PageRequest {
            page,
            size,
            offset,
            sort: filter_sort(self.sort.as_deref(), allowed),
        })
    }
}

/// Page envelope returned by REST listings
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements: total,
            total_pages: (total + request.size - 1) / request.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sort::FILM_SORT_FIELDS;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_apply_when_params_missing() {
        let request = PageParams::default().resolve(FILM_SORT_FIELDS).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset, 0);
        assert_eq!(request.sort, SortOrder::asc("id"));
    }

    #[test]
    fn offset_is_page_times_size() {
        let params = PageParams {
            page: Some(3),
            size: Some(14),
            sort: None,
        };
        let request = params.resolve(FILM_SORT_FIELDS).unwrap();
        assert_eq!(request.offset, 42);
    }

    #[test]
    fn negative_page_is_rejected() {
        let params = PageParams {
            page: Some(-1),
            ..Default::default()
        };
        assert_matches!(params.resolve(FILM_SORT_FIELDS), Err(Error::Validation(_)));
    }

    #[test]
    fn huge_page_number_is_rejected_not_overflowed() {
        let params = PageParams {
            page: Some(i64::MAX / 2),
            size: Some(100),
            sort: None,
        };
        assert_matches!(params.resolve(FILM_SORT_FIELDS), Err(Error::Validation(_)));
    }

    #[test]
    fn out_of_range_size_is_rejected() {
        for size in [0, -5, MAX_PAGE_SIZE + 1] {
            let params = PageParams {
                size: Some(size),
                ..Default::default()
            };
            assert_matches!(params.resolve(FILM_SORT_FIELDS), Err(Error::Validation(_)));
        }
    }

    #[test]
    fn unknown_sort_field_is_dropped_not_rejected() {
        let params = PageParams {
            sort: Some("poster_url".to_string()),
            ..Default::default()
        };
        let request = params.resolve(FILM_SORT_FIELDS).unwrap();
        assert_eq!(request.sort, SortOrder::asc("id"));
    }

    #[test]
    fn page_envelope_computes_total_pages() {
        let request = PageParams::default().resolve(FILM_SORT_FIELDS).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 41);
        assert_eq!(page.total_elements, 41);
        assert_eq!(page.total_pages, 3); // 41 items at size 20
    }
}
