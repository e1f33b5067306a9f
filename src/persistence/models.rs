//! Database row models for the `events` and `bookings` tables.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{Booking, BookingId, Event, EventId, Slug};
use crate::error::DevEventError;

/// A stored row from the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Primary key.
    pub id: Uuid,
    /// Normalized slug, unique.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Venue.
    pub location: String,
    /// Organizer name.
    pub organizer: Option<String>,
    /// Image URL.
    pub image: String,
    /// Category label.
    pub category: Option<String>,
    /// Calendar date.
    pub date: NaiveDate,
    /// Free-text time.
    pub time: String,
    /// Price per seat in minor units.
    pub price: i64,
    /// Seat capacity.
    pub capacity: Option<i32>,
    /// Seats left.
    pub available_seats: Option<i32>,
    /// Tag set (`TEXT[]`).
    pub tags: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = DevEventError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::from_uuid(row.id),
            slug: Slug::parse(&row.slug)?,
            title: row.title,
            description: row.description,
            location: row.location,
            organizer: row.organizer,
            image: row.image,
            category: row.category,
            date: row.date,
            time: row.time,
            price: row.price,
            capacity: row.capacity,
            available_seats: row.available_seats,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A stored row from the `bookings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning event.
    pub event_id: Uuid,
    /// Attendee name.
    pub user_name: String,
    /// Attendee email.
    pub user_email: String,
    /// Attendee phone.
    pub user_phone: Option<String>,
    /// Seats reserved.
    pub number_of_seats: i32,
    /// Snapshotted total price.
    pub total_price: i64,
    /// Booking date.
    pub booking_date: DateTime<Utc>,
    /// Reservation status string.
    pub status: String,
    /// Payment status string.
    pub payment_status: String,
    /// Payment provider reference.
    pub payment_id: Option<String>,
    /// Attendee requests.
    pub special_requests: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DevEventError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookingId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            user_name: row.user_name,
            user_email: row.user_email,
            user_phone: row.user_phone,
            number_of_seats: row.number_of_seats,
            total_price: row.total_price,
            booking_date: row.booking_date,
            status: row.status.parse().map_err(corrupt)?,
            payment_status: row.payment_status.parse().map_err(corrupt)?,
            payment_id: row.payment_id,
            special_requests: row.special_requests,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Unknown enum strings in the database are a storage fault, not bad input.
fn corrupt(err: DevEventError) -> DevEventError {
    DevEventError::Store(format!("corrupt booking row: {err}"))
}
