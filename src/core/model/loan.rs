//! Loans and the requests that move them through their lifecycle

use super::{id_string, validate_iso_date};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    #[default]
    Loaned,
    Returned,
    Overdue,
}

impl LoanStatus {
    /// Loaned and overdue loans still hold a copy
    pub fn is_active(self) -> bool {
        !matches!(self, LoanStatus::Returned)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(deserialize_with = "id_string")]
    pub loan_id: String,
    #[serde(deserialize_with = "id_string")]
    pub user_id: String,
    #[serde(deserialize_with = "id_string")]
    pub book_id: String,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub book_author: String,
    pub loan_date: String,
    pub due_date: String,
    #[serde(default)]
    pub status: LoanStatus,
    #[serde(default)]
    pub extension_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoanCreateRequest {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "bookId is required"))]
    pub book_id: String,
    #[validate(custom(function = "validate_iso_date"))]
    pub loan_date: String,
    #[validate(custom(function = "validate_iso_date"))]
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoanReturnRequest {
    #[validate(custom(function = "validate_iso_date"))]
    pub return_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoanExtendRequest {
    #[validate(range(
        min = 1,
        max = 365,
        message = "extension must be between one day and a year"
    ))]
    pub days: u32,
}
