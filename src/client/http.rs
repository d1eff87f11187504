//! [`Backend`] over the backend's REST API, using reqwest

use crate::config::AppConfig;
use crate::core::Backend;
use crate::core::envelope::decode_records;
use crate::core::error::{BackendError, BackendResult};
use crate::core::model::{
    Book, BookCreateRequest, BookReservation, BookUpdateRequest, HealthStatus, LibraryStats, Loan,
    LoanCreateRequest, LoanExtendRequest, LoanReturnRequest, Reservation,
    ReservationCreateRequest, SearchParams, SearchResponse, SystemStatus, User,
    UserRegisterRequest, UserUpdateRequest,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// What a request is about, for error messages
#[derive(Clone, Copy)]
struct Target<'a> {
    resource: &'static str,
    id: &'a str,
}

impl<'a> Target<'a> {
    fn new(resource: &'static str, id: &'a str) -> Self {
        Self { resource, id }
    }
}

/// HTTP client for the library backend
///
/// Every call is a single request: no retries, no caching. Status codes are
/// mapped onto [`BackendError`] so callers can distinguish a missing record
/// from a conflict or an outage.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a client for `base_url` (e.g. `http://localhost:8080/api/v1`)
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("library-web/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Transport {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Self::with_client(client, base_url)
    }

    pub fn from_config(config: &AppConfig) -> BackendResult<Self> {
        Self::new(
            config.backend_url(),
            Duration::from_secs(config.backend.timeout_secs),
        )
    }

    /// Use an existing reqwest client (shared pools, custom TLS)
    pub fn with_client(client: Client, base_url: &str) -> BackendResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            BackendError::Transport {
                message: format!("invalid backend URL '{}': {}", base_url, e),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Transport {
                message: format!("backend URL '{}' cannot be a base", base_url),
            });
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with `segments` appended, each percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    async fn execute(&self, request: RequestBuilder, target: Target<'_>) -> BackendResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(resource = target.resource, error = %e, "backend unreachable");
            BackendError::Transport {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        debug!(resource = target.resource, id = target.id, status = status.as_u16(), "backend response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status, &body, target))
    }

    async fn json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        target: Target<'_>,
    ) -> BackendResult<T> {
        let response = self.execute(request, target).await?;
        response.json::<T>().await.map_err(|e| BackendError::Decode {
            message: format!("{}: {}", target.resource, e),
        })
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        target: Target<'_>,
    ) -> BackendResult<T> {
        self.json(self.request(method, segments).json(body), target)
            .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        target: Target<'_>,
    ) -> BackendResult<T> {
        self.json(self.request(Method::GET, segments), target).await
    }

    async fn no_content(
        &self,
        method: Method,
        segments: &[&str],
        target: Target<'_>,
    ) -> BackendResult<()> {
        self.execute(self.request(method, segments), target).await?;
        Ok(())
    }
}

/// Map a non-success status onto the error family
fn map_status(status: StatusCode, body: &str, target: Target<'_>) -> BackendError {
    let message = error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    });

    match status {
        StatusCode::NOT_FOUND => BackendError::not_found(target.resource, target.id),
        StatusCode::CONFLICT => BackendError::Conflict { message },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            BackendError::Rejected { message }
        }
        other => BackendError::Status {
            status: other.as_u16(),
            message,
        },
    }
}

/// The backend's `{"message": ...}` or the proxy's `{"error": ...}` body
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(trimmed.chars().take(200).collect()),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_books(&self) -> BackendResult<Vec<Book>> {
        let request = self
            .request(Method::GET, &["books"])
            .query(&[("format", "array")]);
        let value: Value = self.json(request, Target::new("Books", "")).await?;
        decode_records(value)
    }

    async fn get_book(&self, book_id: &str) -> BackendResult<Book> {
        self.get(&["books", book_id], Target::new("Book", book_id))
            .await
    }

    async fn books_by_category(&self, category: &str) -> BackendResult<Vec<Book>> {
        let value: Value = self
            .get(&["books", "category", category], Target::new("Category", category))
            .await?;
        decode_records(value)
    }

    async fn create_book(&self, request: BookCreateRequest) -> BackendResult<Book> {
        self.send_json(Method::POST, &["books"], &request, Target::new("Book", ""))
            .await
    }

    async fn update_book(&self, book_id: &str, request: BookUpdateRequest) -> BackendResult<Book> {
        self.send_json(
            Method::PUT,
            &["books", book_id],
            &request,
            Target::new("Book", book_id),
        )
        .await
    }

    async fn delete_book(&self, book_id: &str) -> BackendResult<()> {
        self.no_content(Method::DELETE, &["books", book_id], Target::new("Book", book_id))
            .await
    }

    async fn available_for_reservation(
        &self,
        user_id: Option<&str>,
    ) -> BackendResult<Vec<BookReservation>> {
        let mut request = self.request(Method::GET, &["books", "available-for-reservation"]);
        if let Some(user_id) = user_id {
            request = request.query(&[("userId", user_id)]);
        }
        self.json(request, Target::new("User", user_id.unwrap_or_default()))
            .await
    }

    async fn search_books(&self, params: &SearchParams) -> BackendResult<SearchResponse> {
        let request = self
            .request(Method::GET, &["search", "books"])
            .query(&params.query_pairs());
        self.json(request, Target::new("Search", "")).await
    }

    async fn user_loans(&self, user_id: &str) -> BackendResult<Vec<Loan>> {
        let request = self
            .request(Method::GET, &["loans"])
            .query(&[("userId", user_id)]);
        self.json(request, Target::new("User", user_id)).await
    }

    async fn create_loan(&self, request: LoanCreateRequest) -> BackendResult<Loan> {
        let target = Target::new("Book", &request.book_id);
        self.send_json(Method::POST, &["loans"], &request, target)
            .await
    }

    async fn return_loan(&self, loan_id: &str, request: LoanReturnRequest) -> BackendResult<Loan> {
        self.send_json(
            Method::POST,
            &["loans", loan_id, "return"],
            &request,
            Target::new("Loan", loan_id),
        )
        .await
    }

    async fn extend_loan(&self, loan_id: &str, days: u32) -> BackendResult<Loan> {
        self.send_json(
            Method::POST,
            &["loans", loan_id, "extend"],
            &LoanExtendRequest { days },
            Target::new("Loan", loan_id),
        )
        .await
    }

    async fn extend_loan_default(&self, loan_id: &str) -> BackendResult<Loan> {
        self.json(
            self.request(Method::POST, &["loans", loan_id, "extend", "default"]),
            Target::new("Loan", loan_id),
        )
        .await
    }

    async fn create_reservation(
        &self,
        request: ReservationCreateRequest,
    ) -> BackendResult<Reservation> {
        let target = Target::new("Book", &request.book_id);
        self.send_json(Method::POST, &["reservations"], &request, target)
            .await
    }

    async fn cancel_reservation(&self, reservation_id: &str) -> BackendResult<()> {
        self.no_content(
            Method::DELETE,
            &["reservations", reservation_id],
            Target::new("Reservation", reservation_id),
        )
        .await
    }

    async fn complete_reservation(&self, reservation_id: &str) -> BackendResult<()> {
        self.no_content(
            Method::POST,
            &["reservations", reservation_id, "complete"],
            Target::new("Reservation", reservation_id),
        )
        .await
    }

    async fn user_reservations(&self, user_id: &str) -> BackendResult<Vec<Reservation>> {
        self.get(&["reservations", "users", user_id], Target::new("User", user_id))
            .await
    }

    async fn register_user(&self, request: UserRegisterRequest) -> BackendResult<User> {
        self.send_json(
            Method::POST,
            &["users", "register"],
            &request,
            Target::new("User", ""),
        )
        .await
    }

    async fn get_user(&self, user_id: &str) -> BackendResult<User> {
        self.get(&["users", user_id], Target::new("User", user_id))
            .await
    }

    async fn update_user(&self, user_id: &str, request: UserUpdateRequest) -> BackendResult<User> {
        self.send_json(
            Method::PUT,
            &["users", user_id],
            &request,
            Target::new("User", user_id),
        )
        .await
    }

    async fn list_users(&self) -> BackendResult<Vec<User>> {
        self.get(&["users"], Target::new("Users", "")).await
    }

    async fn delete_user(&self, user_id: &str) -> BackendResult<()> {
        self.no_content(Method::DELETE, &["users", user_id], Target::new("User", user_id))
            .await
    }

    async fn library_stats(&self) -> BackendResult<LibraryStats> {
        self.get(&["admin", "reports", "summary"], Target::new("Report", "summary"))
            .await
    }

    async fn system_status(&self) -> BackendResult<SystemStatus> {
        self.get(&["monitor", "status"], Target::new("Monitor", "status"))
            .await
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        self.get(&["monitor", "health"], Target::new("Monitor", "health"))
            .await
    }
}
