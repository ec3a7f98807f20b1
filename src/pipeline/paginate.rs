// Paginator - fixed-size slices of a sorted result set

use serde::{Deserialize, Serialize};

/// One page of results plus the numbers a pager needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 1-based page number that was requested
    pub page: usize,

    /// Never less than 1, even with no results
    pub total_pages: usize,

    pub total_results: usize,

    /// 1-based position of the first item on the page, 0 when the page is empty
    pub start_index: usize,

    /// 1-based position of the last item on the page, 0 when the page is empty
    pub end_index: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages needed for `total_results`
pub fn total_pages(total_results: usize, page_size: usize) -> usize {
    total_results.div_ceil(page_size.max(1)).max(1)
}

/// Slice `[(page-1)*size, page*size)` out of `items`.
///
/// Does not clamp `page_number`; an out-of-range page comes back empty.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_results = items.len();

    let slice = page_number
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
        .filter(|&start| start < total_results)
        .map(|start| &items[start..(start + page_size).min(total_results)])
        .unwrap_or(&[]);

    let (start_index, end_index) = if slice.is_empty() {
        (0, 0)
    } else {
        let start = (page_number - 1) * page_size + 1;
        (start, start + slice.len() - 1)
    };

    Page {
        items: slice.to_vec(),
        page: page_number,
        total_pages: total_pages(total_results, page_size),
        total_results,
        start_index,
        end_index,
    }
}
