//! Route table of the proxy

use super::handlers::{admin, books, circulation, users};
use super::state::AppState;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Prefix every backend route is mounted under
pub const API_PREFIX: &str = "/api/v1";

/// Backend routes, relative to [`API_PREFIX`]
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/available-for-reservation",
            get(books::available_for_reservation),
        )
        .route("/books/category/{category}", get(books::books_by_category))
        .route(
            "/books/{book_id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/search/books", get(books::search_books))
        .route(
            "/loans",
            get(circulation::list_loans).post(circulation::create_loan),
        )
        .route("/loans/{loan_id}/return", post(circulation::return_loan))
        .route("/loans/{loan_id}/extend", post(circulation::extend_loan))
        .route(
            "/loans/{loan_id}/extend/default",
            post(circulation::extend_loan_default),
        )
        .route("/reservations", post(circulation::create_reservation))
        .route(
            "/reservations/{reservation_id}",
            delete(circulation::cancel_reservation),
        )
        .route(
            "/reservations/{reservation_id}/cancel",
            post(circulation::cancel_reservation),
        )
        .route(
            "/reservations/{reservation_id}/complete",
            post(circulation::complete_reservation),
        )
        .route(
            "/reservations/users/{user_id}",
            get(circulation::user_reservations),
        )
        .route("/users", get(users::list_users))
        .route("/users/register", post(users::register_user))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/admin/reports/summary", get(admin::library_stats))
        .route("/monitor/status", get(admin::system_status))
        .route("/monitor/health", get(admin::health))
        .with_state(state)
}

/// Liveness of the proxy itself, independent of the backend
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "library-web"
    }))
}
