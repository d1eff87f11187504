//! Hosting pages
//!
//! Each page owns its state, receives the [`Backend`](crate::core::Backend)
//! and a [`Notifier`](crate::core::Notifier) at construction, and reports
//! outcomes through the notifier rather than returning UI text.

pub mod admin;
pub mod catalog;
pub mod loans;
pub mod reservations;

pub use admin::{AdminBooksPage, Dashboard};
pub use catalog::{CatalogPage, CatalogStatus};
pub use loans::{LoanDesk, days_overdue, days_until};
pub use reservations::ReservationDesk;
