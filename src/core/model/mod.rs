//! Wire model exchanged with the backend (camelCase JSON)

pub mod book;
pub mod loan;
pub mod report;
pub mod reservation;
pub mod search;
pub mod user;

pub use book::{Book, BookCreateRequest, BookReservation, BookUpdateRequest};
pub use loan::{Loan, LoanCreateRequest, LoanExtendRequest, LoanReturnRequest, LoanStatus};
pub use report::{ComponentStatus, DatabaseHealth, HealthStatus, LibraryStats, SystemStatus, TopBook};
pub use reservation::{Reservation, ReservationCreateRequest, ReservationStatus};
pub use search::{SearchParams, SearchResponse};
pub use user::{User, UserRegisterRequest, UserUpdateRequest};

use serde::{Deserialize, Deserializer};

/// Identifiers arrive as strings from the current backend and as integers
/// from older deployments; both are kept as strings.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

/// `YYYY-MM-DD` check shared by request validators
pub(crate) fn validate_iso_date(value: &str) -> Result<(), validator::ValidationError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            let mut err = validator::ValidationError::new("iso_date");
            err.message = Some("must be a YYYY-MM-DD date".into());
            err
        })
}
