//! Pass-through proxy exposing the backend API under `/api/v1`
//!
//! The proxy forwards every call to a [`Backend`](crate::core::Backend). The
//! only logic of its own is consolidating `/books` into one deduplicated,
//! client-side paginated listing, normalizing dates on book updates and
//! stamping missing reservation dates.

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use extract::Validated;
pub use router::API_PREFIX;
pub use state::AppState;
