//! View controller: the single authority over criteria

use super::criteria::{CategoryFilter, Criteria, PageSize, SortDirection, SortField, ViewAction};
use super::filter::select_all;
use super::paginate::{DerivedView, paginate};
use super::record::Record;
use super::sort::sort_all;
use crate::core::error::CriterionError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owns the source collection and current criteria, and keeps the derived
/// view in sync with both
///
/// Every change recomputes the view synchronously: full filter, full sort,
/// then one page. Empty sources, empty results and stale page indexes all
/// produce an empty page rather than an error.
#[derive(Debug, Clone)]
pub struct ViewController<R> {
    source: Arc<[R]>,
    criteria: Criteria,
    view: DerivedView<R>,
}

impl<R: Record + Clone> ViewController<R> {
    pub fn new(page_size: PageSize) -> Self {
        Self::with_criteria(Criteria::with_page_size(page_size))
    }

    pub fn with_criteria(criteria: Criteria) -> Self {
        let mut controller = Self {
            source: Arc::from(Vec::new()),
            view: DerivedView::empty(criteria.page_index),
            criteria,
        };
        controller.recompute();
        controller
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.dispatch(ViewAction::SetKeyword(keyword.into()));
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.dispatch(ViewAction::SetCategory(category.into()));
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.dispatch(ViewAction::SetSort(field, direction));
    }

    /// Parse and apply a sort coming from an untyped caller
    ///
    /// Unknown fields or directions are rejected and leave the criteria as
    /// they were.
    pub fn set_sort_str(&mut self, field: &str, direction: &str) -> Result<(), CriterionError> {
        let field: SortField = field.parse()?;
        let direction: SortDirection = direction.parse()?;
        self.set_sort(field, direction);
        Ok(())
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.dispatch(ViewAction::SetPageIndex(index));
    }

    /// Change the page size; zero is rejected and nothing changes
    pub fn set_page_size(&mut self, size: usize) -> Result<(), CriterionError> {
        let size = PageSize::try_from(size)?;
        self.dispatch(ViewAction::SetPageSize(size));
        Ok(())
    }

    pub fn replace_source_collection(&mut self, records: Vec<R>) {
        self.dispatch(ViewAction::ReplaceSource(records));
    }

    /// Move forward one page; no-op on the last page
    pub fn next_page(&mut self) {
        if self.view.has_next {
            self.set_page_index(self.criteria.page_index + 1);
        }
    }

    /// Move back one page; no-op on the first page
    pub fn previous_page(&mut self) {
        if self.criteria.page_index > 0 {
            self.set_page_index(self.criteria.page_index - 1);
        }
    }

    /// Apply an action and recompute the derived view
    pub fn dispatch(&mut self, action: ViewAction<R>) {
        self.criteria = self.criteria.reduce(&action);
        if let ViewAction::ReplaceSource(records) = action {
            self.source = Arc::from(records);
        }
        self.recompute();
    }

    pub fn view(&self) -> &DerivedView<R> {
        &self.view
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn source(&self) -> &[R] {
        &self.source
    }

    /// Number of records passing the filters, across every page
    pub fn filtered_len(&self) -> usize {
        self.view.total_matching
    }

    /// The complete filtered and sorted sequence, not just the current page
    pub fn ordered(&self) -> Vec<&R> {
        let mut selected = select_all(&self.source, &self.criteria);
        sort_all(
            &mut selected,
            self.criteria.sort_field,
            self.criteria.sort_direction,
        );
        selected
    }

    /// Distinct categories of the source collection with per-category counts
    pub fn categories(&self) -> CategorySummary {
        CategorySummary::from_records(&self.source)
    }

    fn recompute(&mut self) {
        let ordered = self.ordered();
        let view = paginate(&ordered, self.criteria.page_index, self.criteria.page_size).cloned();
        tracing::trace!(
            total_matching = view.total_matching,
            page_index = view.page_index,
            items = view.items.len(),
            "view recomputed"
        );
        self.view = view;
    }
}

impl<R: Record + Clone> Default for ViewController<R> {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

/// Categories present in a collection, sorted, with record counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub categories: Vec<String>,
    pub count_by_category: BTreeMap<String, usize>,
}

impl CategorySummary {
    /// Records without a category are not counted
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        let mut count_by_category: BTreeMap<String, usize> = BTreeMap::new();
        for category in records.iter().filter_map(|r| r.category()) {
            *count_by_category.entry(category.to_string()).or_default() += 1;
        }
        Self {
            categories: count_by_category.keys().cloned().collect(),
            count_by_category,
        }
    }
}
