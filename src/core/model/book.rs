//! Book records and the admin request bodies that create or change them

use super::{id_string, validate_iso_date};
use crate::view::Record;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// ISBN-10 or ISBN-13, hyphens and spaces allowed, trailing X for ISBN-10
static ISBN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d[\- ]?){9}[\dXx]$|^(?:\d[\- ]?){12}\d$").expect("valid ISBN regex")
});

/// A catalog entry as the backend reports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(alias = "id", deserialize_with = "id_string")]
    pub book_id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub copies_available: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.copies_available > 0
    }
}

impl Record for Book {
    fn id(&self) -> &str {
        &self.book_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn published_date(&self) -> Option<&str> {
        self.published_date.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookCreateRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(regex(path = *ISBN_PATTERN, message = "not a valid ISBN"))]
    pub isbn: String,
    #[validate(custom(function = "validate_iso_date"))]
    pub published_date: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(range(min = 0, message = "copies cannot be negative"))]
    pub copies_available: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update; absent fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "title cannot be blank"))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "author cannot be blank"))]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *ISBN_PATTERN, message = "not a valid ISBN"))]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "copies cannot be negative"))]
    pub copies_available: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BookUpdateRequest {
    /// Reduce `publishedDate` to its `YYYY-MM-DD` prefix
    ///
    /// Admin forms send full timestamps; the backend only accepts dates.
    /// Values that do not parse are passed through for the backend to reject.
    pub fn normalize_published_date(&mut self) {
        if let Some(date) = self.published_date.as_mut() {
            if let Some(parsed) = crate::view::parse_datetime(date) {
                *date = parsed.date().format("%Y-%m-%d").to_string();
            }
        }
    }

    /// Overlay the present fields onto `book`
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(isbn) = &self.isbn {
            book.isbn = isbn.clone();
        }
        if let Some(date) = &self.published_date {
            book.published_date = Some(date.clone());
        }
        if let Some(category) = &self.category {
            book.category = Some(category.clone());
        }
        if let Some(copies) = self.copies_available {
            book.copies_available = copies;
        }
        if let Some(description) = &self.description {
            book.description = Some(description.clone());
        }
    }
}

/// A book as offered on the reservation page, with queue information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReservation {
    #[serde(deserialize_with = "id_string")]
    pub book_id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub copies_available: i32,
    #[serde(default)]
    pub current_reservations: u32,
    /// Position of the asking user in the queue; `None` if not queued
    #[serde(default)]
    pub user_reservation_order: Option<u32>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub isbn: String,
}

impl Record for BookReservation {
    fn id(&self) -> &str {
        &self.book_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn published_date(&self) -> Option<&str> {
        self.published_date.as_deref()
    }
}
