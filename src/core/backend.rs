//! The backend collaborator seam

use crate::core::error::BackendResult;
use crate::core::model::{
    Book, BookCreateRequest, BookReservation, BookUpdateRequest, HealthStatus, LibraryStats, Loan,
    LoanCreateRequest, LoanReturnRequest, Reservation, ReservationCreateRequest, SearchParams,
    SearchResponse, SystemStatus, User, UserRegisterRequest, UserUpdateRequest,
};
use async_trait::async_trait;

/// Every operation the client needs from the library backend
///
/// Implementations own persistence and business rules (loan limits,
/// extension caps, delete guards). Callers pass values through and react to
/// the typed [`BackendError`](crate::core::error::BackendError) variants.
/// Shared as `Arc<dyn Backend>` so hosting pages and the proxy receive it by
/// injection.
#[async_trait]
pub trait Backend: Send + Sync {
    // --- Books ---

    /// Bulk fetch of the whole catalog, duplicates already removed
    async fn list_books(&self) -> BackendResult<Vec<Book>>;

    async fn get_book(&self, book_id: &str) -> BackendResult<Book>;

    async fn books_by_category(&self, category: &str) -> BackendResult<Vec<Book>>;

    async fn create_book(&self, request: BookCreateRequest) -> BackendResult<Book>;

    async fn update_book(&self, book_id: &str, request: BookUpdateRequest) -> BackendResult<Book>;

    async fn delete_book(&self, book_id: &str) -> BackendResult<()>;

    /// Books that can be reserved, with queue positions for `user_id` if given
    async fn available_for_reservation(
        &self,
        user_id: Option<&str>,
    ) -> BackendResult<Vec<BookReservation>>;

    // --- Search ---

    async fn search_books(&self, params: &SearchParams) -> BackendResult<SearchResponse>;

    // --- Loans ---

    async fn user_loans(&self, user_id: &str) -> BackendResult<Vec<Loan>>;

    async fn create_loan(&self, request: LoanCreateRequest) -> BackendResult<Loan>;

    async fn return_loan(&self, loan_id: &str, request: LoanReturnRequest) -> BackendResult<Loan>;

    async fn extend_loan(&self, loan_id: &str, days: u32) -> BackendResult<Loan>;

    /// Extend by the backend's configured default period
    async fn extend_loan_default(&self, loan_id: &str) -> BackendResult<Loan>;

    // --- Reservations ---

    async fn create_reservation(
        &self,
        request: ReservationCreateRequest,
    ) -> BackendResult<Reservation>;

    async fn cancel_reservation(&self, reservation_id: &str) -> BackendResult<()>;

    async fn complete_reservation(&self, reservation_id: &str) -> BackendResult<()>;

    async fn user_reservations(&self, user_id: &str) -> BackendResult<Vec<Reservation>>;

    // --- Users ---

    async fn register_user(&self, request: UserRegisterRequest) -> BackendResult<User>;

    async fn get_user(&self, user_id: &str) -> BackendResult<User>;

    async fn update_user(&self, user_id: &str, request: UserUpdateRequest) -> BackendResult<User>;

    async fn list_users(&self) -> BackendResult<Vec<User>>;

    async fn delete_user(&self, user_id: &str) -> BackendResult<()>;

    // --- Admin and monitoring ---

    async fn library_stats(&self) -> BackendResult<LibraryStats>;

    async fn system_status(&self) -> BackendResult<SystemStatus>;

    async fn health(&self) -> BackendResult<HealthStatus>;
}
