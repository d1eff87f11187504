//! # library-web
//!
//! Client-side core of a library-management web application.
//!
//! ## Features
//!
//! - **Collection view engine**: keyword and category filtering, locale-aware
//!   sorting and fixed-size pagination over an in-memory collection, driven
//!   by a single [`ViewController`](view::ViewController)
//! - **Backend seam**: one [`Backend`](core::Backend) trait, implemented over
//!   HTTP by [`HttpBackend`](client::HttpBackend) and locally by
//!   [`InMemoryBackend`](storage::InMemoryBackend)
//! - **Hosting pages**: catalog, admin, loan and reservation pages that own
//!   their state and report through an injected [`Notifier`](core::Notifier)
//! - **Pass-through proxy**: an axum router exposing the backend API under
//!   `/api/v1`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use library_web::prelude::*;
//!
//! let backend: Arc<dyn Backend> = Arc::new(HttpBackend::from_config(&config)?);
//! let mut catalog = CatalogPage::new(backend, Arc::new(TracingNotifier), config.page_size());
//!
//! catalog.load().await;
//! catalog.set_keyword("tolkien");
//! catalog.set_sort(SortField::PublishedDate, SortDirection::Desc);
//! for book in &catalog.view().items {
//!     println!("{} ({})", book.title, book.author);
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod logging;
pub mod pages;
pub mod server;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Backend, BackendError, BackendResult, CriterionError, LibraryError, Notice, NoticeLevel,
        Notifier, Paginated, Payload, RecordingNotifier, TracingNotifier,
    };

    // === Model ===
    pub use crate::core::model::{
        Book, BookCreateRequest, BookReservation, BookUpdateRequest, Loan, LoanCreateRequest,
        LoanStatus, Reservation, ReservationCreateRequest, ReservationStatus, SearchParams, User,
    };

    // === View Engine ===
    pub use crate::view::{
        CategoryFilter, Criteria, DerivedView, PageSize, Record, SortDirection, SortField,
        ViewController,
    };

    // === Pages ===
    pub use crate::pages::{AdminBooksPage, CatalogPage, LoanDesk, ReservationDesk};

    // === Backends ===
    pub use crate::client::HttpBackend;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryBackend;

    // === Server ===
    pub use crate::config::AppConfig;
    pub use crate::server::ServerBuilder;

    // === Re-exports from dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
