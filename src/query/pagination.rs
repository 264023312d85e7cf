//! Page window arithmetic for list endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::{DEFAULT_LIMIT, DEFAULT_PAGE};

/// Link to a neighbouring page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageLink {
    #[schema(example = 2)]
    pub page: u64,
    #[schema(example = 25)]
    pub limit: u64,
}

/// Next/previous page links; absent links are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
}

/// Derived page window for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u64,
    pub limit: u64,
    pub start_index: u64,
    pub end_index: u64,
    pub total: u64,
    pub pagination: Pagination,
}

impl PaginationState {
    /// Page size in the form the driver's `limit` expects.
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

/// Leading unsigned integer of `raw`, ignoring trailing garbage (`"3abc"` is 3).
/// Zero, negative and non-numeric input yield `None`.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    let trimmed = raw?.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..end].parse::<u64>().ok().filter(|n| *n > 0)
}

/// Compute the page window and next/prev links.
///
/// `total` is the number of records matching the listing's filter.
pub fn compute_pagination(page: Option<&str>, limit: Option<&str>, total: u64) -> PaginationState {
    let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
    let limit = parse_positive(limit).unwrap_or(DEFAULT_LIMIT);

    let start_index = (page - 1).saturating_mul(limit);
    let end_index = page.saturating_mul(limit);

    let mut pagination = Pagination::default();

    if end_index < total {
        pagination.next = Some(PageLink {
            page: page + 1,
            limit,
        });
    }

    if start_index > 0 {
        pagination.prev = Some(PageLink {
            page: page - 1,
            limit,
        });
    }

    PaginationState {
        page,
        limit,
        start_index,
        end_index,
        total,
        pagination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_has_no_links() {
        let state = compute_pagination(Some("1"), Some("25"), 10);
        assert_eq!(state.pagination, Pagination::default());
        assert_eq!((state.start_index, state.end_index), (0, 25));
    }

    #[test]
    fn test_first_page_links_forward() {
        let state = compute_pagination(Some("1"), Some("5"), 12);
        assert_eq!(state.pagination.next, Some(PageLink { page: 2, limit: 5 }));
        assert_eq!(state.pagination.prev, None);
    }

    #[test]
    fn test_last_page_links_back() {
        let state = compute_pagination(Some("3"), Some("5"), 12);
        assert_eq!(state.end_index, 15);
        assert_eq!(state.pagination.next, None);
        assert_eq!(state.pagination.prev, Some(PageLink { page: 2, limit: 5 }));
    }

    #[test]
    fn test_middle_page_links_both_ways() {
        let state = compute_pagination(Some("2"), Some("5"), 12);
        assert_eq!(state.start_index, 5);
        assert_eq!(state.pagination.next, Some(PageLink { page: 3, limit: 5 }));
        assert_eq!(state.pagination.prev, Some(PageLink { page: 1, limit: 5 }));
    }

    #[test]
    fn test_boundary_end_index_equal_to_total() {
        let state = compute_pagination(Some("2"), Some("5"), 10);
        assert_eq!(state.pagination.next, None);
    }

    #[test]
    fn test_missing_and_malformed_input_uses_defaults() {
        for (page, limit) in [
            (None, None),
            (Some("abc"), Some("xyz")),
            (Some(""), Some("")),
            (Some("0"), Some("0")),
            (Some("-3"), Some("-10")),
            (Some("99999999999999999999999"), Some("1e3x")),
        ] {
            let state = compute_pagination(page, limit, 0);
            assert_eq!(state.page, DEFAULT_PAGE, "page input {:?}", page);
            assert!(state.limit > 0);
        }
        assert_eq!(compute_pagination(None, Some("abc"), 0).limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_lenient_integer_prefix() {
        let state = compute_pagination(Some(" 3abc"), Some("+10rows"), 100);
        assert_eq!((state.page, state.limit), (3, 10));
        assert_eq!(state.start_index, 20);
        assert_eq!(compute_pagination(None, Some("1e3x"), 0).limit, 1);
    }

    #[test]
    fn test_huge_values_saturate() {
        let state = compute_pagination(Some("18446744073709551615"), Some("2"), 5);
        assert_eq!(state.end_index, u64::MAX);
        assert_eq!(state.pagination.next, None);
        assert!(state.pagination.prev.is_some());
        assert_eq!(state.limit_i64(), 2);
    }

    #[test]
    fn test_serialized_links_omit_absent_sides() {
        let state = compute_pagination(Some("1"), Some("5"), 12);
        let json = serde_json::to_value(&state.pagination).unwrap();
        assert_eq!(json, serde_json::json!({ "next": { "page": 2, "limit": 5 } }));
    }
}
