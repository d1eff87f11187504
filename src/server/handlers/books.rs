//! `/books` and `/search` handlers

use crate::core::error::{LibraryError, RequestError};
use crate::core::model::{
    Book, BookCreateRequest, BookReservation, BookUpdateRequest, SearchParams, SearchResponse,
};
use crate::core::{Paginated, dedupe_by_id};
use crate::server::extract::Validated;
use crate::server::state::AppState;
use crate::view::{PageSize, paginate};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub page: Option<usize>,
    pub size: Option<usize>,
    /// `array` asks for the bare array instead of an envelope
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

/// The full catalog, deduplicated by id
///
/// The backend is always fetched in bulk; paging happens here so that every
/// caller sees the same ordering and totals.
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Response, LibraryError> {
    let books = dedupe_by_id(state.backend.list_books().await?);

    if query.format.as_deref() == Some("array") {
        return Ok(Json(books).into_response());
    }

    let size = query.size.unwrap_or(state.config.server.default_list_size);
    let page_size = PageSize::try_from(size).map_err(|e| RequestError::InvalidParameter {
        name: "size".to_string(),
        message: e.to_string(),
    })?;
    let view = paginate(&books, query.page.unwrap_or(0), page_size);
    Ok(Json(Paginated::from_view(view, size)).into_response())
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Book>, LibraryError> {
    Ok(Json(state.backend.get_book(&book_id).await?))
}

pub async fn books_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Book>>, LibraryError> {
    Ok(Json(state.backend.books_by_category(&category).await?))
}

pub async fn create_book(
    State(state): State<AppState>,
    Validated(request): Validated<BookCreateRequest>,
) -> Result<(StatusCode, Json<Book>), LibraryError> {
    let book = state.backend.create_book(request).await?;
    tracing::info!(book_id = %book.book_id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Validated(mut request): Validated<BookUpdateRequest>,
) -> Result<Json<Book>, LibraryError> {
    request.normalize_published_date();
    Ok(Json(state.backend.update_book(&book_id, request).await?))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<StatusCode, LibraryError> {
    state.backend.delete_book(&book_id).await?;
    tracing::info!(book_id = %book_id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn available_for_reservation(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<BookReservation>>, LibraryError> {
    let user_id = query.user_id.as_deref().filter(|id| !id.is_empty());
    Ok(Json(state.backend.available_for_reservation(user_id).await?))
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, LibraryError> {
    if params.size == 0 {
        return Err(RequestError::InvalidParameter {
            name: "size".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }
    Ok(Json(state.backend.search_books(&params).await?))
}
