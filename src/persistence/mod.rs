//! Persistence layer: the store contract and its backends.
//!
//! [`EventStore`] is the only way the services touch state. Every write that
//! must be indivisible (seat reservation, cancellation with seat restore,
//! status compare-and-set) is a single trait method, so each backend can
//! implement it as one critical section or one transaction.
//!
//! Two backends exist: [`MemoryStore`] for tests and single-node setups,
//! and [`PostgresStore`] backed by `sqlx::PgPool`. [`StoreBackend`] selects
//! one at startup and owns its lifecycle.

pub mod memory;
pub mod models;
pub mod postgres;

use std::future::Future;

use chrono::{DateTime, Utc};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::config::AppConfig;
use crate::domain::{Booking, BookingId, BookingStatus, Event, EventId, PaymentStatus, Slug};
use crate::error::DevEventError;

/// Window over the newest-first event listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Number of events to skip.
    pub offset: usize,
    /// Maximum number of events to return; `None` returns everything.
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Query returning the whole listing.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            offset: 0,
            limit: None,
        }
    }

    /// Query returning one page.
    #[must_use]
    pub const fn page(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }
}

/// Storage contract consumed by the catalog, the ledger and the
/// similarity engine.
///
/// Reads are plain lookups. Writes that change seat inventory are atomic:
/// no interleaving of concurrent calls can drive `available_seats` below
/// zero or restore the seats of one booking twice.
pub trait EventStore: Send + Sync {
    /// Persists a new event.
    ///
    /// # Errors
    ///
    /// [`DevEventError::DuplicateSlug`] if the slug is taken,
    /// [`DevEventError::Store`] on backend failure.
    fn insert_event(&self, event: &Event) -> impl Future<Output = Result<(), DevEventError>> + Send;

    /// Looks an event up by id.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn event_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, DevEventError>> + Send;

    /// Looks an event up by normalized slug.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn event_by_slug(
        &self,
        slug: &Slug,
    ) -> impl Future<Output = Result<Option<Event>, DevEventError>> + Send;

    /// Lists events newest first (`created_at` descending, then id).
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn list_events(
        &self,
        query: ListQuery,
    ) -> impl Future<Output = Result<Vec<Event>, DevEventError>> + Send;

    /// Returns every event other than `exclude` whose tags intersect `tags`,
    /// newest first.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn events_sharing_tags(
        &self,
        exclude: EventId,
        tags: &[String],
    ) -> impl Future<Output = Result<Vec<Event>, DevEventError>> + Send;

    /// Decrements the event's seats by `booking.number_of_seats` if enough
    /// remain and inserts `booking`, as one indivisible unit.
    ///
    /// Returns the seats left afterwards (`None` for untracked events).
    ///
    /// # Errors
    ///
    /// - [`DevEventError::EventNotFound`] if the event vanished.
    /// - [`DevEventError::InsufficientSeats`] if the decrement would go
    ///   below zero; nothing is written.
    /// - [`DevEventError::Store`] on backend failure.
    fn reserve_seats(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<i32>, DevEventError>> + Send;

    /// Looks a booking up by id.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn booking_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, DevEventError>> + Send;

    /// Lists the bookings of one event, newest `booking_date` first.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn bookings_for_event(
        &self,
        event_id: EventId,
    ) -> impl Future<Output = Result<Vec<Booking>, DevEventError>> + Send;

    /// Sets the booking status to `to` only if it is currently `from`.
    ///
    /// When the change releases seats (`from` holds seats, `to` does not),
    /// the seats go back onto the event in the same atomic unit.
    /// Returns `false` if the stored status was no longer `from`.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<bool, DevEventError>> + Send;

    /// Sets the payment status to `to` only if it is currently `from`,
    /// recording `payment_id` when given.
    ///
    /// Returns `false` if the stored status was no longer `from`.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on backend failure.
    fn set_payment_status(
        &self,
        id: BookingId,
        from: PaymentStatus,
        to: PaymentStatus,
        payment_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<bool, DevEventError>> + Send;
}

/// Store selected at startup.
///
/// Owns the connection handle: created once by [`StoreBackend::connect`]
/// and released by [`StoreBackend::close`] on shutdown.
#[derive(Debug)]
pub enum StoreBackend {
    /// Process-local store.
    Memory(MemoryStore),
    /// PostgreSQL store.
    Postgres(PostgresStore),
}

impl StoreBackend {
    /// Opens the backend chosen by `config.persistence_enabled`.
    ///
    /// The PostgreSQL backend connects and runs pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DevEventError::Store`] if the database is unreachable or
    /// a migration fails.
    pub async fn connect(config: &AppConfig) -> Result<Self, DevEventError> {
        if !config.persistence_enabled {
            tracing::warn!("persistence disabled, using in-memory store");
            return Ok(Self::Memory(MemoryStore::new()));
        }
        let store = PostgresStore::connect(config).await?;
        store.migrate().await?;
        tracing::info!("connected to postgres store");
        Ok(Self::Postgres(store))
    }

    /// Releases the underlying connections.
    pub async fn close(&self) {
        if let Self::Postgres(store) = self {
            store.close().await;
        }
    }
}

impl EventStore for StoreBackend {
    async fn insert_event(&self, event: &Event) -> Result<(), DevEventError> {
        match self {
            Self::Memory(s) => s.insert_event(event).await,
            Self::Postgres(s) => s.insert_event(event).await,
        }
    }

    async fn event_by_id(&self, id: EventId) -> Result<Option<Event>, DevEventError> {
        match self {
            Self::Memory(s) => s.event_by_id(id).await,
            Self::Postgres(s) => s.event_by_id(id).await,
        }
    }

    async fn event_by_slug(&self, slug: &Slug) -> Result<Option<Event>, DevEventError> {
        match self {
            Self::Memory(s) => s.event_by_slug(slug).await,
            Self::Postgres(s) => s.event_by_slug(slug).await,
        }
    }

    async fn list_events(&self, query: ListQuery) -> Result<Vec<Event>, DevEventError> {
        match self {
            Self::Memory(s) => s.list_events(query).await,
            Self::Postgres(s) => s.list_events(query).await,
        }
    }

    async fn events_sharing_tags(
        &self,
        exclude: EventId,
        tags: &[String],
    ) -> Result<Vec<Event>, DevEventError> {
        match self {
            Self::Memory(s) => s.events_sharing_tags(exclude, tags).await,
            Self::Postgres(s) => s.events_sharing_tags(exclude, tags).await,
        }
    }

    async fn reserve_seats(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> Result<Option<i32>, DevEventError> {
        match self {
            Self::Memory(s) => s.reserve_seats(booking, now).await,
            Self::Postgres(s) => s.reserve_seats(booking, now).await,
        }
    }

    async fn booking_by_id(&self, id: BookingId) -> Result<Option<Booking>, DevEventError> {
        match self {
            Self::Memory(s) => s.booking_by_id(id).await,
            Self::Postgres(s) => s.booking_by_id(id).await,
        }
    }

    async fn bookings_for_event(&self, event_id: EventId) -> Result<Vec<Booking>, DevEventError> {
        match self {
            Self::Memory(s) => s.bookings_for_event(event_id).await,
            Self::Postgres(s) => s.bookings_for_event(event_id).await,
        }
    }

    async fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<bool, DevEventError> {
        match self {
            Self::Memory(s) => s.set_booking_status(id, from, to, now).await,
            Self::Postgres(s) => s.set_booking_status(id, from, to, now).await,
        }
    }

    async fn set_payment_status(
        &self,
        id: BookingId,
        from: PaymentStatus,
        to: PaymentStatus,
        payment_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<bool, DevEventError> {
        match self {
            Self::Memory(s) => s.set_payment_status(id, from, to, payment_id, now).await,
            Self::Postgres(s) => s.set_payment_status(id, from, to, payment_id, now).await,
        }
    }
}
