//! Axum extractor for validated request bodies

use crate::core::error::{LibraryError, RequestError};
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// A JSON body that deserialized and passed its `validator` rules
///
/// ```rust,ignore
/// async fn create_book(
///     State(state): State<AppState>,
///     Validated(request): Validated<BookCreateRequest>,
/// ) -> Result<Json<Book>, LibraryError> { ... }
/// ```
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = LibraryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            LibraryError::from(RequestError::InvalidParameter {
                name: "body".to_string(),
                message: e.body_text(),
            })
        })?;
        value.validate()?;
        Ok(Validated(value))
    }
}
