//! In-memory store guarded by a single async `RwLock`.
//!
//! Reads take the read lock; every write takes the write lock for its whole
//! check-then-mutate sequence, so seat reservation and cancellation are
//! indivisible with respect to each other.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{EventStore, ListQuery};
use crate::domain::{Booking, BookingId, BookingStatus, Event, EventId, PaymentStatus, Slug};
use crate::error::DevEventError;

#[derive(Debug, Default)]
struct Inner {
    events: HashMap<EventId, Event>,
    slugs: HashMap<Slug, EventId>,
    bookings: HashMap<BookingId, Booking>,
}

impl Inner {
    /// Events sorted newest first, ties broken by id.
    fn events_newest_first(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.values().collect();
        events.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        events
    }
}

/// Process-local [`EventStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryStore {
    async fn insert_event(&self, event: &Event) -> Result<(), DevEventError> {
        let mut inner = self.inner.write().await;
        if inner.slugs.contains_key(&event.slug) {
            return Err(DevEventError::DuplicateSlug(event.slug.to_string()));
        }
        inner.slugs.insert(event.slug.clone(), event.id);
        inner.events.insert(event.id, event.clone());
        Ok(())
    }

    async fn event_by_id(&self, id: EventId) -> Result<Option<Event>, DevEventError> {
        Ok(self.inner.read().await.events.get(&id).cloned())
    }

    async fn event_by_slug(&self, slug: &Slug) -> Result<Option<Event>, DevEventError> {
        let inner = self.inner.read().await;
        Ok(inner
            .slugs
            .get(slug)
            .and_then(|id| inner.events.get(id))
            .cloned())
    }

    async fn list_events(&self, query: ListQuery) -> Result<Vec<Event>, DevEventError> {
        let inner = self.inner.read().await;
        let events = inner
            .events_newest_first()
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(events)
    }

    async fn events_sharing_tags(
        &self,
        exclude: EventId,
        tags: &[String],
    ) -> Result<Vec<Event>, DevEventError> {
        let inner = self.inner.read().await;
        let events = inner
            .events_newest_first()
            .into_iter()
            .filter(|event| event.id != exclude && event.shared_tag_count(tags) > 0)
            .cloned()
            .collect();
        Ok(events)
    }

    async fn reserve_seats(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> Result<Option<i32>, DevEventError> {
        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .get_mut(&booking.event_id)
            .ok_or_else(|| DevEventError::EventNotFound(booking.event_id.to_string()))?;

        if !event.try_reserve(booking.number_of_seats, now) {
            return Err(DevEventError::InsufficientSeats {
                requested: booking.number_of_seats,
                available: event.available_seats.unwrap_or(0),
            });
        }
        let remaining = event.available_seats;
        inner.bookings.insert(booking.id, booking.clone());
        Ok(remaining)
    }

    async fn booking_by_id(&self, id: BookingId) -> Result<Option<Booking>, DevEventError> {
        Ok(self.inner.read().await.bookings.get(&id).cloned())
    }

    async fn bookings_for_event(&self, event_id: EventId) -> Result<Vec<Booking>, DevEventError> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        Ok(bookings)
    }

    async fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<bool, DevEventError> {
        let mut inner = self.inner.write().await;
        let Some(booking) = inner.bookings.get_mut(&id) else {
            return Ok(false);
        };
        if booking.status != from {
            return Ok(false);
        }
        booking.status = to;
        booking.updated_at = now;
        let (event_id, seats) = (booking.event_id, booking.number_of_seats);

        if from.holds_seats()
            && !to.holds_seats()
            && let Some(event) = inner.events.get_mut(&event_id)
        {
            event.release(seats, now);
        }
        Ok(true)
    }

    async fn set_payment_status(
        &self,
        id: BookingId,
        from: PaymentStatus,
        to: PaymentStatus,
        payment_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<bool, DevEventError> {
        let mut inner = self.inner.write().await;
        let Some(booking) = inner.bookings.get_mut(&id) else {
            return Ok(false);
        };
        if booking.payment_status != from {
            return Ok(false);
        }
        booking.payment_status = to;
        if let Some(payment_id) = payment_id {
            booking.payment_id = Some(payment_id.to_string());
        }
        booking.updated_at = now;
        Ok(true)
    }
}
