//! Paging query parameters and response metadata.

use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

use shoeclean_app::pagination::{Page, PageRequest};

/// Page size used by list endpoints unless they say otherwise.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;

/// Build a [`PageRequest`] from the optional `page` and `size` query parameters.
pub(crate) fn page_request(
    page: QueryParam<u32, false>,
    size: QueryParam<u32, false>,
    default_size: u32,
) -> PageRequest {
    PageRequest::new(
        page.into_inner().unwrap_or_default(),
        size.into_inner().unwrap_or(default_size),
    )
}

/// Treat an absent or blank `filter` query parameter as no filter.
pub(crate) fn filter(filter: QueryParam<String, false>) -> Option<String> {
    filter
        .into_inner()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Paging metadata returned alongside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageMeta {
    /// Zero-based page number
    pub number: u32,

    /// Items per page
    pub size: u32,

    /// Items across every page
    pub total: u64,

    /// Number of pages
    pub total_pages: u64,
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            number: page.page,
            size: page.size,
            total: page.total,
            total_pages: page.total_pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_meta_counts_pages() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 5);

        assert_eq!(
            PageMeta::from(&page),
            PageMeta {
                number: 1,
                size: 2,
                total: 5,
                total_pages: 3,
            }
        );
    }
}
