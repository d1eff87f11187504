//! Collection view engine
//!
//! Turns an in-memory source collection plus a set of [`Criteria`] into a
//! [`DerivedView`]: filter, then sort, then page. The engine is synchronous,
//! performs no I/O and never mutates the source collection.
//!
//! ```rust,ignore
//! let mut controller = ViewController::new(PageSize::default());
//! controller.replace_source_collection(books);
//! controller.set_keyword("dune");
//! controller.set_sort(SortField::PublishedDate, SortDirection::Desc);
//! for book in &controller.view().items {
//!     println!("{}", book.title);
//! }
//! ```

pub mod collation;
pub mod controller;
pub mod criteria;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod sort;

#[cfg(test)]
pub(crate) mod testing;

pub use collation::{BinaryCollation, Collation, FoldedCollation};
pub use controller::{CategorySummary, ViewController};
pub use criteria::{
    CategoryFilter, Criteria, DEFAULT_PAGE_SIZE, PageSize, SortDirection, SortField, ViewAction,
};
pub use filter::{matches, matches_category, matches_keyword, select_all};
pub use paginate::{DerivedView, paginate};
pub use record::Record;
pub use sort::{compare, compare_with, parse_datetime, parse_timestamp, sort_all, sort_all_with};
