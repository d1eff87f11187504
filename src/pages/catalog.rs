//! Catalog page: the bulk catalog behind a view controller

use crate::core::error::{BackendError, CriterionError};
use crate::core::model::Book;
use crate::core::{Backend, Notifier};
use crate::view::{
    CategoryFilter, CategorySummary, Criteria, DerivedView, PageSize, SortDirection, SortField,
    ViewController,
};
use std::sync::Arc;

/// What the page should render around the derived view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Nothing fetched yet
    Idle,
    Ready,
    /// Fetched, but no record passes the current filters
    NoResults,
    /// The last fetch failed; the page shows an empty collection
    FetchFailed(BackendError),
}

pub struct CatalogPage {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    controller: ViewController<Book>,
    last_error: Option<BackendError>,
    loaded: bool,
}

impl CatalogPage {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>, page_size: PageSize) -> Self {
        Self {
            backend,
            notifier,
            controller: ViewController::new(page_size),
            last_error: None,
            loaded: false,
        }
    }

    /// Fetch the full catalog and install it as the source collection
    ///
    /// A failed fetch is reported through the notifier and leaves the page
    /// with an empty collection; it is never returned as an error.
    pub async fn load(&mut self) -> &DerivedView<Book> {
        match self.backend.list_books().await {
            Ok(books) => {
                tracing::debug!(count = books.len(), "catalog loaded");
                self.last_error = None;
                self.controller.replace_source_collection(books);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load catalog");
                self.notifier
                    .error(&format!("Could not load the catalog: {}", err));
                self.last_error = Some(err);
                self.controller.replace_source_collection(Vec::new());
            }
        }
        self.loaded = true;
        self.controller.view()
    }

    /// Drop the current source collection and fetch it again
    ///
    /// Called after every successful mutation. Criteria other than the page
    /// index survive the reload.
    pub async fn invalidate_and_reload(&mut self) -> &DerivedView<Book> {
        tracing::debug!("catalog invalidated");
        self.load().await
    }

    pub fn status(&self) -> CatalogStatus {
        if let Some(err) = &self.last_error {
            CatalogStatus::FetchFailed(err.clone())
        } else if !self.loaded {
            CatalogStatus::Idle
        } else if self.controller.filtered_len() == 0 {
            CatalogStatus::NoResults
        } else {
            CatalogStatus::Ready
        }
    }

    pub fn view(&self) -> &DerivedView<Book> {
        self.controller.view()
    }

    pub fn criteria(&self) -> &Criteria {
        self.controller.criteria()
    }

    pub fn categories(&self) -> CategorySummary {
        self.controller.categories()
    }

    pub fn controller(&self) -> &ViewController<Book> {
        &self.controller
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.controller.set_keyword(keyword);
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.controller.set_category(category);
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.controller.set_sort(field, direction);
    }

    /// Apply a sort chosen in the UI; invalid input is reported and ignored
    pub fn set_sort_str(&mut self, field: &str, direction: &str) -> Result<(), CriterionError> {
        self.controller
            .set_sort_str(field, direction)
            .inspect_err(|e| self.notifier.error(&e.to_string()))
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<(), CriterionError> {
        self.controller
            .set_page_size(size)
            .inspect_err(|e| self.notifier.error(&e.to_string()))
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.controller.set_page_index(index);
    }

    pub fn next_page(&mut self) {
        self.controller.next_page();
    }

    pub fn previous_page(&mut self) {
        self.controller.previous_page();
    }
}
