//! Booking ledger: seat reservations and their lifecycles.

use std::sync::Arc;

use crate::domain::{
    Booking, BookingId, BookingStatus, Clock, EventId, NewBooking, PaymentStatus, Transition,
};
use crate::error::DevEventError;
use crate::persistence::{EventStore, StoreBackend};

/// Compare-and-set attempts before giving up on a contended booking.
///
/// Both lifecycles only move forward, so a booking can change under us at
/// most twice before every further transition is a no-op or illegal.
const MAX_CAS_ATTEMPTS: usize = 3;

/// Owns booking records and the seat-capacity invariant.
///
/// Every seat change goes through one atomic store operation; the ledger
/// never reads seats and writes them back in two steps.
#[derive(Debug)]
pub struct BookingLedger<S = StoreBackend> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: EventStore> BookingLedger<S> {
    /// Creates a ledger over `store`.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Books seats on an event.
    ///
    /// The booking starts `pending` with payment `pending`, and its total
    /// price is snapshotted from the event's current price.
    ///
    /// # Errors
    ///
    /// - [`DevEventError::EventNotFound`] if the event does not exist.
    /// - [`DevEventError::Validation`] for malformed details.
    /// - [`DevEventError::InsufficientSeats`] if the seats are not available
    ///   at commit time; no booking is written.
    /// - [`DevEventError::Store`] on persistence failure.
    pub async fn create_booking(
        &self,
        event_id: EventId,
        details: NewBooking,
    ) -> Result<Booking, DevEventError> {
        let event = self
            .store
            .event_by_id(event_id)
            .await?
            .ok_or_else(|| DevEventError::EventNotFound(event_id.to_string()))?;

        let now = self.clock.now();
        let booking = details.into_booking(&event, BookingId::new(), now)?;

        match self.store.reserve_seats(&booking, now).await {
            Ok(remaining) => {
                tracing::info!(
                    %event_id,
                    booking_id = %booking.id,
                    seats = booking.number_of_seats,
                    remaining = ?remaining,
                    "booking created"
                );
                Ok(booking)
            }
            Err(err @ DevEventError::InsufficientSeats { .. }) => {
                tracing::debug!(%event_id, error = %err, "booking rejected");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Looks a booking up by id.
    ///
    /// # Errors
    ///
    /// [`DevEventError::BookingNotFound`] if it does not exist,
    /// [`DevEventError::Store`] on persistence failure.
    pub async fn get_booking(&self, id: BookingId) -> Result<Booking, DevEventError> {
        self.store
            .booking_by_id(id)
            .await?
            .ok_or(DevEventError::BookingNotFound(id))
    }

    /// Lists an event's bookings, newest first.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on persistence failure.
    pub async fn list_bookings(&self, event_id: EventId) -> Result<Vec<Booking>, DevEventError> {
        self.store.bookings_for_event(event_id).await
    }

    /// Moves a booking from `pending` to `confirmed`.
    ///
    /// Confirming a confirmed booking is a no-op.
    ///
    /// # Errors
    ///
    /// - [`DevEventError::BookingNotFound`] if it does not exist.
    /// - [`DevEventError::InvalidState`] if it was cancelled.
    /// - [`DevEventError::Store`] on persistence failure.
    pub async fn confirm_booking(&self, id: BookingId) -> Result<Booking, DevEventError> {
        self.transition_status(id, BookingStatus::Confirmed).await
    }

    /// Cancels a booking and returns its seats to the event.
    ///
    /// Cancelling twice restores the seats once.
    ///
    /// # Errors
    ///
    /// [`DevEventError::BookingNotFound`] if it does not exist,
    /// [`DevEventError::Store`] on persistence failure.
    pub async fn cancel_booking(&self, id: BookingId) -> Result<Booking, DevEventError> {
        self.transition_status(id, BookingStatus::Cancelled).await
    }

    /// Moves the payment lifecycle to `to`, optionally recording the
    /// provider's payment reference.
    ///
    /// Repeating the current status is a no-op unless it carries a new
    /// payment reference, which is then stored.
    ///
    /// # Errors
    ///
    /// - [`DevEventError::BookingNotFound`] if it does not exist.
    /// - [`DevEventError::InvalidState`] for an illegal payment transition.
    /// - [`DevEventError::Store`] on persistence failure.
    pub async fn update_payment_status(
        &self,
        id: BookingId,
        to: PaymentStatus,
        payment_id: Option<String>,
    ) -> Result<Booking, DevEventError> {
        let payment_id = payment_id
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        for _ in 0..MAX_CAS_ATTEMPTS {
            let mut booking = self.get_booking(id).await?;
            let from = booking.payment_status;
            let new_reference = payment_id.is_some() && payment_id != booking.payment_id;
            if from.transition(to)? == Transition::Unchanged && !new_reference {
                return Ok(booking);
            }
            let now = self.clock.now();
            if self
                .store
                .set_payment_status(id, from, to, payment_id.as_deref(), now)
                .await?
            {
                tracing::info!(booking_id = %id, %from, %to, "payment status updated");
                booking.payment_status = to;
                if payment_id.is_some() {
                    booking.payment_id.clone_from(&payment_id);
                }
                booking.updated_at = now;
                return Ok(booking);
            }
            tracing::debug!(booking_id = %id, "payment status changed concurrently, retrying");
        }
        Err(contended(id))
    }

    async fn transition_status(
        &self,
        id: BookingId,
        to: BookingStatus,
    ) -> Result<Booking, DevEventError> {
        for _ in 0..MAX_CAS_ATTEMPTS {
            let mut booking = self.get_booking(id).await?;
            let from = booking.status;
            if from.transition(to)? == Transition::Unchanged {
                return Ok(booking);
            }
            let now = self.clock.now();
            if self.store.set_booking_status(id, from, to, now).await? {
                tracing::info!(
                    booking_id = %id,
                    event_id = %booking.event_id,
                    %from,
                    %to,
                    seats = booking.number_of_seats,
                    "booking status updated"
                );
                booking.status = to;
                booking.updated_at = now;
                return Ok(booking);
            }
            tracing::debug!(booking_id = %id, "booking status changed concurrently, retrying");
        }
        Err(contended(id))
    }
}

fn contended(id: BookingId) -> DevEventError {
    DevEventError::Internal(format!("booking {id} kept changing during update"))
}
