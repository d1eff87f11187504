//! Backend clients that talk to a remote library backend

pub mod http;

pub use http::HttpBackend;
