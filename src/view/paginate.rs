//! Paginator: slice an ordered sequence into fixed-size pages

use super::criteria::PageSize;
use serde::{Deserialize, Serialize};

/// One page of a filtered and sorted collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView<R> {
    /// Records on this page (at most `page_size`)
    pub items: Vec<R>,
    /// Matching records across all pages
    pub total_matching: usize,
    pub total_pages: usize,
    pub page_index: usize,
    pub has_next: bool,
}

impl<R> DerivedView<R> {
    pub fn empty(page_index: usize) -> Self {
        Self {
            items: Vec::new(),
            total_matching: 0,
            total_pages: 0,
            page_index,
            has_next: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Map the items to a different type
    pub fn map<U, F>(self, f: F) -> DerivedView<U>
    where
        F: FnMut(R) -> U,
    {
        DerivedView {
            items: self.items.into_iter().map(f).collect(),
            total_matching: self.total_matching,
            total_pages: self.total_pages,
            page_index: self.page_index,
            has_next: self.has_next,
        }
    }
}

impl<R: Clone> DerivedView<&R> {
    pub fn cloned(self) -> DerivedView<R> {
        self.map(Clone::clone)
    }
}

impl<R> Default for DerivedView<R> {
    fn default() -> Self {
        Self::empty(0)
    }
}

/// Cut page `page_index` out of `ordered`
///
/// A page past the end yields an empty page, never an error. The index is not
/// clamped; that policy belongs to the caller.
pub fn paginate<T: Clone>(ordered: &[T], page_index: usize, page_size: PageSize) -> DerivedView<T> {
    let size = page_size.get();
    let total_matching = ordered.len();
    let total_pages = total_matching.div_ceil(size);

    let items = match page_index.checked_mul(size) {
        Some(start) if start < total_matching => {
            let end = start.saturating_add(size).min(total_matching);
            ordered[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    DerivedView {
        items,
        total_matching,
        total_pages,
        page_index,
        has_next: page_index.saturating_add(1) < total_pages,
    }
}
