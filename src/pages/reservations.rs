//! Reservation desk: books waiting for copies and a user's reservations

use crate::core::error::{BackendError, LibraryError};
use crate::core::model::{BookReservation, Reservation, ReservationCreateRequest};
use crate::core::{Backend, Notifier};
use crate::view::{PageSize, ViewController};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Reservable books are browsed through the same view engine as the catalog
pub struct ReservationDesk {
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    user_id: Option<String>,
    available: ViewController<BookReservation>,
    reservations: Vec<Reservation>,
}

impl ReservationDesk {
    pub fn new(backend: Arc<dyn Backend>, notifier: Arc<dyn Notifier>, page_size: PageSize) -> Self {
        Self {
            backend,
            notifier,
            user_id: None,
            available: ViewController::new(page_size),
            reservations: Vec::new(),
        }
    }

    /// Load reservable books (and the user's own reservations, if known)
    pub async fn load(&mut self, user_id: Option<&str>) {
        self.user_id = user_id.map(str::to_string);

        match self.backend.available_for_reservation(user_id).await {
            Ok(books) => self.available.replace_source_collection(books),
            Err(err) => {
                self.report("Could not load reservable books", &err);
                self.available.replace_source_collection(Vec::new());
            }
        }

        self.reservations = match user_id {
            Some(uid) => match self.backend.user_reservations(uid).await {
                Ok(reservations) => reservations,
                Err(err) => {
                    self.report("Could not load reservations", &err);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
    }

    pub async fn reserve(
        &mut self,
        user_id: &str,
        book_id: &str,
        now: NaiveDateTime,
    ) -> Result<Reservation, LibraryError> {
        let mut request = ReservationCreateRequest {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            reservation_date: None,
        };
        request.stamp_if_missing(now);

        match self.backend.create_reservation(request).await {
            Ok(reservation) => {
                self.notifier
                    .success(&format!("'{}' is reserved", reservation.book_title));
                self.load(Some(user_id)).await;
                Ok(reservation)
            }
            Err(err) => {
                self.report("Could not reserve the book", &err);
                Err(err.into())
            }
        }
    }

    pub async fn cancel(&mut self, reservation_id: &str) -> Result<(), LibraryError> {
        match self.backend.cancel_reservation(reservation_id).await {
            Ok(()) => {
                self.notifier.success("Reservation cancelled");
                let user_id = self.user_id.clone();
                self.load(user_id.as_deref()).await;
                Ok(())
            }
            Err(err) => {
                self.report("Could not cancel the reservation", &err);
                Err(err.into())
            }
        }
    }

    /// Mark a reservation fulfilled (the reader collected the book)
    pub async fn complete(&mut self, reservation_id: &str) -> Result<(), LibraryError> {
        match self.backend.complete_reservation(reservation_id).await {
            Ok(()) => {
                self.notifier.success("Reservation completed");
                let user_id = self.user_id.clone();
                self.load(user_id.as_deref()).await;
                Ok(())
            }
            Err(err) => {
                self.report("Could not complete the reservation", &err);
                Err(err.into())
            }
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn available(&self) -> &ViewController<BookReservation> {
        &self.available
    }

    pub fn available_mut(&mut self) -> &mut ViewController<BookReservation> {
        &mut self.available
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    fn report(&self, message: &str, err: &BackendError) {
        tracing::warn!(error = %err, "{}", message);
        self.notifier.error(&format!("{}: {}", message, err));
    }
}
