use super::id_string;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    #[default]
    Reserved,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_open(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Reserved)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(deserialize_with = "id_string")]
    pub reservation_id: String,
    #[serde(deserialize_with = "id_string")]
    pub user_id: String,
    #[serde(deserialize_with = "id_string")]
    pub book_id: String,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub book_author: String,
    pub reservation_date: String,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `reservationDate` may be omitted; the proxy stamps the current time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreateRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "bookId is required"))]
    pub book_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_date: Option<String>,
}

impl ReservationCreateRequest {
    pub fn stamp_if_missing(&mut self, now: chrono::NaiveDateTime) {
        if self.reservation_date.as_deref().is_none_or(str::is_empty) {
            self.reservation_date = Some(now.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }
}
