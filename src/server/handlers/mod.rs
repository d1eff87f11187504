//! Proxy handlers, grouped by backend resource

pub mod admin;
pub mod books;
pub mod circulation;
pub mod users;
