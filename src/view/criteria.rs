//! Filter, sort and page criteria driving a derived view

use crate::core::error::CriterionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Page size used when a hosting page does not configure one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Field the sort comparator orders by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Title,
    Author,
    PublishedDate,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::PublishedDate => "publishedDate",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "publishedDate" | "published_date" => Ok(SortField::PublishedDate),
            other => Err(CriterionError::UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Apply the direction to a natural ordering
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(CriterionError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Category criterion; `All` disables category filtering
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Wire value that selects every category
    pub const ALL: &'static str = "ALL";

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl From<&str> for CategoryFilter {
    /// `"ALL"` and the empty string select every category; anything else,
    /// `"all"` included, is an exact, case-sensitive category name.
    fn from(value: &str) -> Self {
        if value.is_empty() || value == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        CategoryFilter::from(value.as_str())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL),
            CategoryFilter::Exact(c) => f.write_str(c),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(CategoryFilter::from(raw))
    }
}

/// Number of records per page; never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(NonZeroUsize::new(DEFAULT_PAGE_SIZE).expect("default page size is non-zero"))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = CriterionError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PageSize)
            .ok_or(CriterionError::ZeroPageSize)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl From<NonZeroUsize> for PageSize {
    fn from(size: NonZeroUsize) -> Self {
        PageSize(size)
    }
}

/// The user-selected parameters behind a derived view
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub keyword: String,
    pub category: CategoryFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub page_index: usize,
    pub page_size: PageSize,
}

impl Criteria {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Apply one criterion change, returning the next criteria
    ///
    /// Every change except a page move resets `page_index` to 0. Replacing the
    /// source collection does not touch any criterion but still resets the page.
    pub fn reduce<R>(&self, action: &ViewAction<R>) -> Criteria {
        let mut next = self.clone();
        match action {
            ViewAction::SetKeyword(keyword) => {
                next.keyword = keyword.clone();
                next.page_index = 0;
            }
            ViewAction::SetCategory(category) => {
                next.category = category.clone();
                next.page_index = 0;
            }
            ViewAction::SetSort(field, direction) => {
                next.sort_field = *field;
                next.sort_direction = *direction;
                next.page_index = 0;
            }
            ViewAction::SetPageSize(size) => {
                next.page_size = *size;
                next.page_index = 0;
            }
            ViewAction::SetPageIndex(index) => {
                next.page_index = *index;
            }
            ViewAction::ReplaceSource(_) => {
                next.page_index = 0;
            }
        }
        next
    }
}

/// A single change dispatched to the view controller
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction<R> {
    SetKeyword(String),
    SetCategory(CategoryFilter),
    SetSort(SortField, SortDirection),
    SetPageIndex(usize),
    SetPageSize(PageSize),
    ReplaceSource(Vec<R>),
}
