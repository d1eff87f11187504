//! Admin reports and monitor endpoints

use super::id_string;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total_books: u64,
    pub total_loans: u64,
    pub total_reservations: u64,
    pub active_users: u64,
    /// Keeps the backend's category order
    #[serde(default)]
    pub books_by_category: IndexMap<String, u64>,
    #[serde(default)]
    pub top_books: Vec<TopBook>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBook {
    #[serde(deserialize_with = "id_string")]
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub loan_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub status: String,
    /// Rendered with its unit, e.g. `"12ms"`
    pub response_time: String,
}

impl ComponentStatus {
    pub fn up(response_time_ms: u64) -> Self {
        Self {
            status: "UP".into(),
            response_time: format!("{}ms", response_time_ms),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub database: ComponentStatus,
    pub cache: ComponentStatus,
    pub external_service: ComponentStatus,
}

/// The backend reports the database either as a bare status or as a
/// component object, depending on version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatabaseHealth {
    Summary(String),
    Detailed(ComponentStatus),
}

impl DatabaseHealth {
    pub fn status(&self) -> &str {
        match self {
            DatabaseHealth::Summary(status) => status,
            DatabaseHealth::Detailed(component) => &component.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: DatabaseHealth,
    pub timestamp: String,
}
