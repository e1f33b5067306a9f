//! PostgreSQL implementation of the store.
//!
//! Seat changes are conditional `UPDATE`s executed inside the same
//! transaction as the booking write. PostgreSQL re-evaluates the `WHERE`
//! clause after acquiring the row lock, so two concurrent reservations can
//! never both pass the `available_seats >= $n` check on a stale value.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{BookingRow, EventRow};
use super::{EventStore, ListQuery};
use crate::config::AppConfig;
use crate::domain::{Booking, BookingId, BookingStatus, Event, EventId, PaymentStatus, Slug};
use crate::error::DevEventError;

const EVENT_COLUMNS: &str = "id, slug, title, description, location, organizer, image, category, \
     date, time, price, capacity, available_seats, tags, created_at, updated_at";

const BOOKING_COLUMNS: &str = "id, event_id, user_name, user_email, user_phone, number_of_seats, \
     total_price, booking_date, status, payment_status, payment_id, special_requests, \
     created_at, updated_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized and timed by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`DevEventError::Store`] if the database is unreachable.
    pub async fn connect(config: &AppConfig) -> Result<Self, DevEventError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(config.database_connect_timeout())
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Runs the embedded SQL migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`DevEventError::Store`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), DevEventError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DevEventError::Store(format!("migration failed: {e}")))
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn events_from_rows(rows: Vec<EventRow>) -> Result<Vec<Event>, DevEventError> {
    rows.into_iter().map(Event::try_from).collect()
}

impl EventStore for PostgresStore {
    async fn insert_event(&self, event: &Event) -> Result<(), DevEventError> {
        sqlx::query(
            "INSERT INTO events (id, slug, title, description, location, organizer, image, \
             category, date, time, price, capacity, available_seats, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(event.id.as_uuid())
        .bind(event.slug.as_str())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(&event.organizer)
        .bind(&event.image)
        .bind(&event.category)
        .bind(event.date)
        .bind(&event.time)
        .bind(event.price)
        .bind(event.capacity)
        .bind(event.available_seats)
        .bind(&event.tags)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return DevEventError::DuplicateSlug(event.slug.to_string());
            }
            DevEventError::from(e)
        })?;
        Ok(())
    }

    async fn event_by_id(&self, id: EventId) -> Result<Option<Event>, DevEventError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Event::try_from).transpose()
    }

    async fn event_by_slug(&self, slug: &Slug) -> Result<Option<Event>, DevEventError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Event::try_from).transpose()
    }

    async fn list_events(&self, query: ListQuery) -> Result<Vec<Event>, DevEventError> {
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        // LIMIT NULL means no limit in PostgreSQL.
        let limit = query.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             ORDER BY created_at DESC, id DESC OFFSET $1 LIMIT $2"
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        events_from_rows(rows)
    }

    async fn events_sharing_tags(
        &self,
        exclude: EventId,
        tags: &[String],
    ) -> Result<Vec<Event>, DevEventError> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE id <> $1 AND tags && $2 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(exclude.as_uuid())
        .bind(tags)
        .fetch_all(&self.pool)
        .await?;
        events_from_rows(rows)
    }

    async fn reserve_seats(
        &self,
        booking: &Booking,
        now: DateTime<Utc>,
    ) -> Result<Option<i32>, DevEventError> {
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query_scalar::<_, Option<i32>>(
            "UPDATE events SET available_seats = available_seats - $2, updated_at = $3 \
             WHERE id = $1 AND (available_seats IS NULL OR available_seats >= $2) \
             RETURNING available_seats",
        )
        .bind(booking.event_id.as_uuid())
        .bind(booking.number_of_seats)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(remaining) = reserved else {
            let current = sqlx::query_scalar::<_, Option<i32>>(
                "SELECT available_seats FROM events WHERE id = $1",
            )
            .bind(booking.event_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
            tx.rollback().await?;
            return Err(match current {
                None => DevEventError::EventNotFound(booking.event_id.to_string()),
                Some(available) => DevEventError::InsufficientSeats {
                    requested: booking.number_of_seats,
                    available: available.unwrap_or(0),
                },
            });
        };

        sqlx::query(&format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"
        ))
        .bind(booking.id.as_uuid())
        .bind(booking.event_id.as_uuid())
        .bind(&booking.user_name)
        .bind(&booking.user_email)
        .bind(&booking.user_phone)
        .bind(booking.number_of_seats)
        .bind(booking.total_price)
        .bind(booking.booking_date)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_id)
        .bind(&booking.special_requests)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(remaining)
    }

    async fn booking_by_id(&self, id: BookingId) -> Result<Option<Booking>, DevEventError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Booking::try_from).transpose()
    }

    async fn bookings_for_event(&self, event_id: EventId) -> Result<Vec<Booking>, DevEventError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE event_id = $1 \
             ORDER BY booking_date DESC"
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<bool, DevEventError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, (uuid::Uuid, i32)>(
            "UPDATE bookings SET status = $3, updated_at = $4 \
             WHERE id = $1 AND status = $2 \
             RETURNING event_id, number_of_seats",
        )
        .bind(id.as_uuid())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((event_id, seats)) = updated else {
            tx.rollback().await?;
            return Ok(false);
        };

        if from.holds_seats() && !to.holds_seats() {
            sqlx::query(
                "UPDATE events SET available_seats = CASE \
                     WHEN capacity IS NULL THEN available_seats + $2 \
                     ELSE LEAST(available_seats + $2, capacity) END, \
                 updated_at = $3 \
                 WHERE id = $1 AND available_seats IS NOT NULL",
            )
            .bind(event_id)
            .bind(seats)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
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
        let result = sqlx::query(
            "UPDATE bookings SET payment_status = $3, payment_id = COALESCE($4, payment_id), \
             updated_at = $5 \
             WHERE id = $1 AND payment_status = $2",
        )
        .bind(id.as_uuid())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(payment_id)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
