//! In-memory implementation of [`Backend`] for testing and development
//!
//! Mirrors the business rules of the real library backend closely enough to
//! drive the hosting pages and the proxy without a server: copy counting,
//! loan and reservation limits, extension caps and delete guards.

use crate::config::{AppConfig, LoanConfig};
use crate::core::Backend;
use crate::core::error::{BackendError, BackendResult};
use crate::core::model::{
    Book, BookCreateRequest, BookReservation, BookUpdateRequest, ComponentStatus, DatabaseHealth,
    HealthStatus, LibraryStats, Loan, LoanCreateRequest, LoanReturnRequest, LoanStatus,
    Reservation, ReservationCreateRequest, ReservationStatus, SearchParams, SearchResponse,
    SystemStatus, TopBook, User, UserRegisterRequest, UserUpdateRequest,
};
use crate::view::{self, CategoryFilter, PageSize, Record};
use async_trait::async_trait;
use chrono::{Days, Duration, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Limits enforced by the in-memory backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CirculationRules {
    pub max_active_loans: usize,
    pub max_extensions: u32,
    pub default_extension_days: u32,
    pub max_open_reservations: usize,
    /// Days a reservation stays completable
    pub reservation_expiry_days: i64,
}

impl Default for CirculationRules {
    fn default() -> Self {
        Self {
            max_active_loans: 5,
            max_extensions: 3,
            default_extension_days: 14,
            max_open_reservations: 3,
            reservation_expiry_days: 7,
        }
    }
}

impl From<&LoanConfig> for CirculationRules {
    fn from(config: &LoanConfig) -> Self {
        Self {
            max_extensions: config.max_extensions,
            default_extension_days: config.default_extension_days,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct LibraryState {
    books: IndexMap<String, Book>,
    users: IndexMap<String, User>,
    loans: IndexMap<String, Loan>,
    reservations: IndexMap<String, Reservation>,
}

impl LibraryState {
    fn book(&self, book_id: &str) -> BackendResult<&Book> {
        self.books
            .get(book_id)
            .ok_or_else(|| BackendError::not_found("Book", book_id))
    }

    fn book_mut(&mut self, book_id: &str) -> BackendResult<&mut Book> {
        self.books
            .get_mut(book_id)
            .ok_or_else(|| BackendError::not_found("Book", book_id))
    }

    fn user(&self, user_id: &str) -> BackendResult<&User> {
        self.users
            .get(user_id)
            .ok_or_else(|| BackendError::not_found("User", user_id))
    }

    fn loan_mut(&mut self, loan_id: &str) -> BackendResult<&mut Loan> {
        self.loans
            .get_mut(loan_id)
            .ok_or_else(|| BackendError::not_found("Loan", loan_id))
    }

    fn reservation_mut(&mut self, reservation_id: &str) -> BackendResult<&mut Reservation> {
        self.reservations
            .get_mut(reservation_id)
            .ok_or_else(|| BackendError::not_found("Reservation", reservation_id))
    }

    fn isbn_taken(&self, isbn: &str, except: Option<&str>) -> bool {
        !isbn.is_empty()
            && self
                .books
                .values()
                .any(|b| b.isbn == isbn && Some(b.book_id.as_str()) != except)
    }

    fn open_reservations_for_book(&self, book_id: &str) -> Vec<&Reservation> {
        let mut open: Vec<&Reservation> = self
            .reservations
            .values()
            .filter(|r| r.book_id == book_id && r.status.is_open())
            .collect();
        open.sort_by_key(|r| view::parse_timestamp(Some(&r.reservation_date)));
        open
    }
}

/// In-memory library backend
///
/// Uses a single RwLock so multi-table rules (copies vs. loans, delete
/// guards) are checked and applied atomically.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<RwLock<LibraryState>>,
    rules: CirculationRules,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: CirculationRules) -> Self {
        Self {
            state: Arc::default(),
            rules,
        }
    }

    /// Backend whose extension rules follow the `loan` config section
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_rules(CirculationRules::from(&config.loan))
    }

    pub fn rules(&self) -> &CirculationRules {
        &self.rules
    }

    /// Insert books as-is, keeping their ids (duplicates overwrite)
    pub fn seed_books(&self, books: impl IntoIterator<Item = Book>) -> BackendResult<()> {
        let mut state = self.write()?;
        for book in books {
            state.books.insert(book.book_id.clone(), book);
        }
        Ok(())
    }

    /// Insert users as-is, keeping their ids
    pub fn seed_users(&self, users: impl IntoIterator<Item = User>) -> BackendResult<()> {
        let mut state = self.write()?;
        for user in users {
            state.users.insert(user.user_id.clone(), user);
        }
        Ok(())
    }

    fn read(&self) -> BackendResult<RwLockReadGuard<'_, LibraryState>> {
        self.state.read().map_err(|e| BackendError::Status {
            status: 500,
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> BackendResult<RwLockWriteGuard<'_, LibraryState>> {
        self.state.write().map_err(|e| BackendError::Status {
            status: 500,
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn rejected(message: impl Into<String>) -> BackendError {
    BackendError::Rejected {
        message: message.into(),
    }
}

fn conflict(message: impl Into<String>) -> BackendError {
    BackendError::Conflict {
        message: message.into(),
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn list_books(&self) -> BackendResult<Vec<Book>> {
        Ok(self.read()?.books.values().cloned().collect())
    }

    async fn get_book(&self, book_id: &str) -> BackendResult<Book> {
        self.read()?.book(book_id).cloned()
    }

    async fn books_by_category(&self, category: &str) -> BackendResult<Vec<Book>> {
        Ok(self
            .read()?
            .books
            .values()
            .filter(|b| Record::category(*b) == Some(category))
            .cloned()
            .collect())
    }

    async fn create_book(&self, request: BookCreateRequest) -> BackendResult<Book> {
        let mut state = self.write()?;
        if state.isbn_taken(&request.isbn, None) {
            return Err(conflict(format!("ISBN {} already exists", request.isbn)));
        }

        let book = Book {
            book_id: new_id(),
            title: request.title,
            author: request.author,
            isbn: request.isbn,
            published_date: Some(request.published_date),
            category: Some(request.category),
            copies_available: request.copies_available,
            description: request.description,
        };
        state.books.insert(book.book_id.clone(), book.clone());
        Ok(book)
    }

    async fn update_book(&self, book_id: &str, request: BookUpdateRequest) -> BackendResult<Book> {
        let mut state = self.write()?;
        state.book(book_id)?;
        if let Some(isbn) = &request.isbn {
            if state.isbn_taken(isbn, Some(book_id)) {
                return Err(conflict(format!("ISBN {} already exists", isbn)));
            }
        }

        let book = state.book_mut(book_id)?;
        request.apply_to(book);
        Ok(book.clone())
    }

    async fn delete_book(&self, book_id: &str) -> BackendResult<()> {
        let mut state = self.write()?;
        state.book(book_id)?;

        if state
            .loans
            .values()
            .any(|l| l.book_id == book_id && l.status.is_active())
        {
            return Err(conflict("Book has active loans"));
        }
        if !state.open_reservations_for_book(book_id).is_empty() {
            return Err(conflict("Book has active reservations"));
        }

        state.books.shift_remove(book_id);
        Ok(())
    }

    async fn available_for_reservation(
        &self,
        user_id: Option<&str>,
    ) -> BackendResult<Vec<BookReservation>> {
        let state = self.read()?;
        if let Some(user_id) = user_id {
            state.user(user_id)?;
        }

        Ok(state
            .books
            .values()
            .filter(|b| !b.is_available())
            .map(|book| {
                let queue = state.open_reservations_for_book(&book.book_id);
                let order = user_id.and_then(|uid| {
                    queue
                        .iter()
                        .position(|r| r.user_id == uid)
                        .map(|pos| pos as u32 + 1)
                });
                BookReservation {
                    book_id: book.book_id.clone(),
                    title: book.title.clone(),
                    author: book.author.clone(),
                    category: book.category.clone(),
                    copies_available: book.copies_available,
                    current_reservations: queue.len() as u32,
                    user_reservation_order: order,
                    published_date: book.published_date.clone(),
                    isbn: book.isbn.clone(),
                }
            })
            .collect())
    }

    async fn search_books(&self, params: &SearchParams) -> BackendResult<SearchResponse> {
        let page_size = PageSize::try_from(params.size)
            .map_err(|_| rejected("size must be greater than zero"))?;
        let category = CategoryFilter::from(params.category.clone().unwrap_or_default());
        let keyword = params.keyword.clone().unwrap_or_default();
        let author = params.author.clone().unwrap_or_default();

        let state = self.read()?;
        let matching: Vec<&Book> = state
            .books
            .values()
            .filter(|b| view::matches_keyword(*b, &keyword))
            .filter(|b| view::matches_category(*b, &category))
            .filter(|b| author.is_empty() || contains_folded(&b.author, &author))
            .collect();

        let page = view::paginate(&matching, params.page, page_size).cloned();
        Ok(SearchResponse {
            books: page.items,
            total_elements: page.total_matching,
            total_pages: page.total_pages,
            has_next: page.has_next,
        })
    }

    async fn user_loans(&self, user_id: &str) -> BackendResult<Vec<Loan>> {
        let state = self.read()?;
        state.user(user_id)?;
        Ok(state
            .loans
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_loan(&self, request: LoanCreateRequest) -> BackendResult<Loan> {
        let mut state = self.write()?;
        state.user(&request.user_id)?;
        let book = state.book(&request.book_id)?.clone();

        if !book.is_available() {
            return Err(rejected("No copies available for loan"));
        }
        let active = state
            .loans
            .values()
            .filter(|l| l.user_id == request.user_id && l.status.is_active())
            .count();
        if active >= self.rules.max_active_loans {
            return Err(rejected(format!(
                "Maximum number of loans ({}) exceeded",
                self.rules.max_active_loans
            )));
        }

        state.book_mut(&book.book_id)?.copies_available -= 1;

        let loan = Loan {
            loan_id: new_id(),
            user_id: request.user_id.clone(),
            book_id: book.book_id.clone(),
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            loan_date: request.loan_date,
            due_date: request.due_date,
            status: LoanStatus::Loaned,
            extension_count: 0,
            returned_at: None,
            created_at: Some(timestamp(now())),
        };
        state.loans.insert(loan.loan_id.clone(), loan.clone());

        // A loan fulfils the borrower's own reservation for the book
        if let Some(reservation) = state.reservations.values_mut().find(|r| {
            r.book_id == book.book_id
                && r.user_id == request.user_id
                && r.status == ReservationStatus::Reserved
        }) {
            reservation.status = ReservationStatus::Completed;
            reservation.updated_at = Some(timestamp(now()));
        }

        tracing::debug!(loan_id = %loan.loan_id, book_id = %loan.book_id, "loan created");
        Ok(loan)
    }

    async fn return_loan(&self, loan_id: &str, _request: LoanReturnRequest) -> BackendResult<Loan> {
        let mut state = self.write()?;
        let loan = state.loan_mut(loan_id)?;
        if loan.status == LoanStatus::Returned {
            return Err(rejected("Loan has already been returned"));
        }
        loan.status = LoanStatus::Returned;
        loan.returned_at = Some(timestamp(now()));
        let loan = loan.clone();

        if let Some(book) = state.books.get_mut(&loan.book_id) {
            book.copies_available += 1;
        }
        Ok(loan)
    }

    async fn extend_loan(&self, loan_id: &str, days: u32) -> BackendResult<Loan> {
        if days == 0 {
            return Err(rejected("Extension must be at least one day"));
        }
        let max_extensions = self.rules.max_extensions;
        let mut state = self.write()?;
        let loan = state.loan_mut(loan_id)?;

        if loan.status != LoanStatus::Loaned {
            return Err(rejected("Only loaned books can be extended"));
        }
        if loan.extension_count >= max_extensions {
            return Err(rejected(format!(
                "Maximum number of extensions ({}) exceeded",
                max_extensions
            )));
        }
        let due = NaiveDate::parse_from_str(&loan.due_date, "%Y-%m-%d")
            .map_err(|_| rejected(format!("Unreadable due date '{}'", loan.due_date)))?;

        let extended = due
            .checked_add_days(Days::new(u64::from(days)))
            .ok_or_else(|| rejected(format!("Cannot extend the loan by {} days", days)))?;

        loan.due_date = extended.format("%Y-%m-%d").to_string();
        loan.extension_count += 1;
        Ok(loan.clone())
    }

    async fn extend_loan_default(&self, loan_id: &str) -> BackendResult<Loan> {
        self.extend_loan(loan_id, self.rules.default_extension_days)
            .await
    }

    async fn create_reservation(
        &self,
        request: ReservationCreateRequest,
    ) -> BackendResult<Reservation> {
        let mut state = self.write()?;
        state.user(&request.user_id)?;
        let book = state.book(&request.book_id)?.clone();

        if book.is_available() {
            return Err(rejected("Book is available for loan"));
        }
        let held = state
            .reservations
            .values()
            .filter(|r| r.user_id == request.user_id && r.status == ReservationStatus::Reserved)
            .collect::<Vec<_>>();
        if held.iter().any(|r| r.book_id == request.book_id) {
            return Err(conflict("User has already reserved this book"));
        }
        if held.len() >= self.rules.max_open_reservations {
            return Err(rejected(format!(
                "Maximum number of reservations ({}) exceeded",
                self.rules.max_open_reservations
            )));
        }

        let created = timestamp(now());
        let reservation = Reservation {
            reservation_id: new_id(),
            user_id: request.user_id,
            book_id: book.book_id,
            book_title: book.title,
            book_author: book.author,
            reservation_date: request
                .reservation_date
                .unwrap_or_else(|| created.clone()),
            status: ReservationStatus::Reserved,
            created_at: Some(created),
            updated_at: None,
        };
        state
            .reservations
            .insert(reservation.reservation_id.clone(), reservation.clone());
        Ok(reservation)
    }

    async fn cancel_reservation(&self, reservation_id: &str) -> BackendResult<()> {
        let mut state = self.write()?;
        let reservation = state.reservation_mut(reservation_id)?;
        if reservation.status != ReservationStatus::Reserved {
            return Err(rejected("Invalid reservation status"));
        }
        reservation.status = ReservationStatus::Cancelled;
        reservation.updated_at = Some(timestamp(now()));
        Ok(())
    }

    async fn complete_reservation(&self, reservation_id: &str) -> BackendResult<()> {
        let expiry = Duration::days(self.rules.reservation_expiry_days);
        let mut state = self.write()?;
        let reservation = state.reservation_mut(reservation_id)?;
        if reservation.status != ReservationStatus::Reserved {
            return Err(rejected("Invalid reservation status"));
        }
        if let Some(reserved_at) = view::parse_datetime(&reservation.reservation_date) {
            if reserved_at + expiry < now() {
                return Err(rejected("Reservation has expired"));
            }
        }
        reservation.status = ReservationStatus::Completed;
        reservation.updated_at = Some(timestamp(now()));
        Ok(())
    }

    async fn user_reservations(&self, user_id: &str) -> BackendResult<Vec<Reservation>> {
        let state = self.read()?;
        state.user(user_id)?;
        let mut reservations: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        // Newest first; stable for equal dates
        reservations.sort_by_key(|r| std::cmp::Reverse(view::parse_timestamp(Some(&r.reservation_date))));
        Ok(reservations)
    }

    async fn register_user(&self, request: UserRegisterRequest) -> BackendResult<User> {
        let mut state = self.write()?;
        if state.users.values().any(|u| u.username == request.username) {
            return Err(conflict("Username already exists"));
        }
        if state.users.values().any(|u| u.email == request.email) {
            return Err(conflict("Email already exists"));
        }

        let user = User {
            user_id: new_id(),
            username: request.username,
            email: request.email,
            full_name: request.full_name,
            created_at: Some(timestamp(now())),
            registered_at: None,
            updated_at: None,
        };
        state.users.insert(user.user_id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> BackendResult<User> {
        self.read()?.user(user_id).cloned()
    }

    async fn update_user(&self, user_id: &str, request: UserUpdateRequest) -> BackendResult<User> {
        let mut state = self.write()?;
        if let Some(email) = &request.email {
            if state
                .users
                .values()
                .any(|u| &u.email == email && u.user_id != user_id)
            {
                return Err(conflict("Email already exists"));
            }
        }
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| BackendError::not_found("User", user_id))?;
        request.apply_to(user);
        user.updated_at = Some(timestamp(now()));
        Ok(user.clone())
    }

    async fn list_users(&self) -> BackendResult<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn delete_user(&self, user_id: &str) -> BackendResult<()> {
        let mut state = self.write()?;
        state.user(user_id)?;
        if state
            .loans
            .values()
            .any(|l| l.user_id == user_id && l.status.is_active())
        {
            return Err(conflict("User has active loans"));
        }
        state.users.shift_remove(user_id);
        Ok(())
    }

    async fn library_stats(&self) -> BackendResult<LibraryStats> {
        let state = self.read()?;

        let mut books_by_category: IndexMap<String, u64> = IndexMap::new();
        for category in state.books.values().filter_map(|b| Record::category(b)) {
            *books_by_category.entry(category.to_string()).or_default() += 1;
        }

        let mut loan_counts: IndexMap<&str, u64> = IndexMap::new();
        for loan in state.loans.values() {
            *loan_counts.entry(loan.book_id.as_str()).or_default() += 1;
        }
        // Stable sort keeps first-loaned books ahead on ties
        loan_counts.sort_by(|_, a, _, b| b.cmp(a));
        let top_books = loan_counts
            .iter()
            .take(5)
            .filter_map(|(book_id, count)| {
                state.books.get(*book_id).map(|book| TopBook {
                    book_id: book.book_id.clone(),
                    title: book.title.clone(),
                    author: book.author.clone(),
                    loan_count: *count,
                })
            })
            .collect();

        Ok(LibraryStats {
            total_books: state.books.len() as u64,
            total_loans: state.loans.len() as u64,
            total_reservations: state.reservations.len() as u64,
            active_users: state.users.len() as u64,
            books_by_category,
            top_books,
        })
    }

    async fn system_status(&self) -> BackendResult<SystemStatus> {
        self.read()?;
        Ok(SystemStatus {
            database: ComponentStatus::up(0),
            cache: ComponentStatus::up(0),
            external_service: ComponentStatus::up(0),
        })
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        self.read()?;
        Ok(HealthStatus {
            status: "UP".to_string(),
            database: DatabaseHealth::Summary("UP".to_string()),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
