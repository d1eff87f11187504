//! Loan and reservation handlers

use super::books::UserQuery;
use crate::core::error::{LibraryError, RequestError};
use crate::core::model::{
    Loan, LoanCreateRequest, LoanExtendRequest, LoanReturnRequest, Reservation,
    ReservationCreateRequest,
};
use crate::server::extract::Validated;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

// =============================================================================
// Loans
// =============================================================================

pub async fn list_loans(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<Loan>>, LibraryError> {
    let user_id = query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RequestError::MissingParameter {
            name: "userId".to_string(),
        })?;
    Ok(Json(state.backend.user_loans(&user_id).await?))
}

pub async fn create_loan(
    State(state): State<AppState>,
    Validated(request): Validated<LoanCreateRequest>,
) -> Result<(StatusCode, Json<Loan>), LibraryError> {
    let loan = state.backend.create_loan(request).await?;
    tracing::info!(loan_id = %loan.loan_id, book_id = %loan.book_id, "loan created");
    Ok((StatusCode::CREATED, Json(loan)))
}

pub async fn return_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
    Validated(request): Validated<LoanReturnRequest>,
) -> Result<Json<Loan>, LibraryError> {
    Ok(Json(state.backend.return_loan(&loan_id, request).await?))
}

pub async fn extend_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
    Validated(request): Validated<LoanExtendRequest>,
) -> Result<Json<Loan>, LibraryError> {
    Ok(Json(state.backend.extend_loan(&loan_id, request.days).await?))
}

pub async fn extend_loan_default(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
) -> Result<Json<Loan>, LibraryError> {
    Ok(Json(state.backend.extend_loan_default(&loan_id).await?))
}

// =============================================================================
// Reservations
// =============================================================================

/// Missing `reservationDate` is stamped with the current local time
pub async fn create_reservation(
    State(state): State<AppState>,
    Validated(mut request): Validated<ReservationCreateRequest>,
) -> Result<(StatusCode, Json<Reservation>), LibraryError> {
    request.stamp_if_missing(chrono::Local::now().naive_local());
    let reservation = state.backend.create_reservation(request).await?;
    tracing::info!(
        reservation_id = %reservation.reservation_id,
        book_id = %reservation.book_id,
        "reservation created"
    );
    Ok((StatusCode::CREATED, Json(reservation)))
}

pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
) -> Result<StatusCode, LibraryError> {
    state.backend.cancel_reservation(&reservation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
) -> Result<StatusCode, LibraryError> {
    state.backend.complete_reservation(&reservation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn user_reservations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Reservation>>, LibraryError> {
    Ok(Json(state.backend.user_reservations(&user_id).await?))
}
