//! Record builders shared by the engine's unit tests

use crate::core::model::Book;

pub(crate) fn book(id: &str, title: &str, author: &str) -> Book {
    Book {
        book_id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        ..Book::default()
    }
}

pub(crate) fn book_in(id: &str, title: &str, author: &str, category: Option<&str>) -> Book {
    Book {
        category: category.map(str::to_string),
        ..book(id, title, author)
    }
}

/// An empty `date` leaves the published date unset
pub(crate) fn book_dated(id: &str, date: &str) -> Book {
    Book {
        published_date: (!date.is_empty()).then(|| date.to_string()),
        ..book(id, &format!("Book {}", id), "Author")
    }
}
