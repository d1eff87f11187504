//! Core types shared by the view engine, the backend clients and the proxy

pub mod backend;
pub mod envelope;
pub mod error;
pub mod model;
pub mod notify;

pub use backend::Backend;
pub use envelope::{Paginated, Payload, decode_records, dedupe_by_id};
pub use error::{
    BackendError, BackendResult, ConfigError, CriterionError, LibraryError, RequestError,
    ValidationError,
};
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
