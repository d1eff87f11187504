//! Admin page: catalog management plus the dashboard

use super::catalog::CatalogPage;
use crate::core::error::{BackendError, LibraryError};
use crate::core::model::{
    Book, BookCreateRequest, BookUpdateRequest, HealthStatus, LibraryStats, SystemStatus,
};
use crate::core::{Backend, Notifier};
use crate::view::PageSize;
use std::sync::Arc;
use validator::Validate;

/// Admin dashboard panels; a panel whose fetch failed is `None`
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub stats: Option<LibraryStats>,
    pub system: Option<SystemStatus>,
    pub health: Option<HealthStatus>,
}

/// Book administration on top of a [`CatalogPage`]
///
/// Every successful mutation notifies and reloads the catalog. Failures
/// notify and leave the source collection as it was.
pub struct AdminBooksPage {
    catalog: CatalogPage,
}

impl AdminBooksPage {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>, page_size: PageSize) -> Self {
        Self {
            catalog: CatalogPage::new(backend, notifier, page_size),
        }
    }

    pub fn catalog(&self) -> &CatalogPage {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogPage {
        &mut self.catalog
    }

    pub async fn load(&mut self) {
        self.catalog.load().await;
    }

    pub async fn create_book(&mut self, request: BookCreateRequest) -> Result<Book, LibraryError> {
        if let Err(errors) = request.validate() {
            self.notifier().error("The book form has invalid fields");
            return Err(errors.into());
        }

        match self.backend().create_book(request).await {
            Ok(book) => {
                self.notifier()
                    .success(&format!("Book '{}' was created", book.title));
                self.catalog.invalidate_and_reload().await;
                Ok(book)
            }
            Err(err) => Err(self.report("create", err)),
        }
    }

    pub async fn update_book(
        &mut self,
        book_id: &str,
        mut request: BookUpdateRequest,
    ) -> Result<Book, LibraryError> {
        request.normalize_published_date();
        if let Err(errors) = request.validate() {
            self.notifier().error("The book form has invalid fields");
            return Err(errors.into());
        }

        match self.backend().update_book(book_id, request).await {
            Ok(book) => {
                self.notifier()
                    .success(&format!("Book '{}' was updated", book.title));
                self.catalog.invalidate_and_reload().await;
                Ok(book)
            }
            Err(err) => Err(self.report("update", err)),
        }
    }

    pub async fn delete_book(&mut self, book_id: &str) -> Result<(), LibraryError> {
        match self.backend().delete_book(book_id).await {
            Ok(()) => {
                self.notifier().success("Book was deleted");
                self.catalog.invalidate_and_reload().await;
                Ok(())
            }
            Err(err) => Err(self.report("delete", err)),
        }
    }

    /// Fetch the three dashboard panels concurrently
    pub async fn dashboard(&self) -> Dashboard {
        let backend = self.backend();
        let (stats, system, health) = tokio::join!(
            backend.library_stats(),
            backend.system_status(),
            backend.health()
        );

        Dashboard {
            stats: self.panel("library statistics", stats),
            system: self.panel("system status", system),
            health: self.panel("health", health),
        }
    }

    fn panel<T>(&self, name: &str, result: Result<T, BackendError>) -> Option<T> {
        result
            .inspect_err(|err| {
                tracing::warn!(panel = name, error = %err, "dashboard panel failed");
                self.notifier()
                    .error(&format!("Could not load {}: {}", name, err));
            })
            .ok()
    }

    fn report(&self, action: &str, err: BackendError) -> LibraryError {
        tracing::warn!(action, error = %err, "book mutation failed");
        let message = match &err {
            BackendError::NotFound { .. } => "That book no longer exists".to_string(),
            BackendError::Conflict { message } => format!("The book cannot be changed: {}", message),
            BackendError::Rejected { message } => format!("Invalid input: {}", message),
            other => format!("Could not {} the book: {}", action, other),
        };
        self.notifier().error(&message);
        err.into()
    }

    fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(self.catalog.backend())
    }

    fn notifier(&self) -> &Arc<dyn Notifier> {
        self.catalog.notifier()
    }
}
