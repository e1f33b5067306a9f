//! Seat reservations against a single event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate::{email, max_chars, optional, required};
use super::{BookingId, BookingStatus, Event, EventId, PaymentStatus};
use crate::error::DevEventError;

/// Maximum length of the attendee name.
pub const USER_NAME_MAX_CHARS: usize = 100;

/// Maximum length of free-text special requests.
pub const SPECIAL_REQUESTS_MAX_CHARS: usize = 500;

/// A reservation of `number_of_seats` against one [`Event`].
///
/// `total_price` is snapshotted at booking time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier.
    pub id: BookingId,
    /// The event this booking belongs to.
    pub event_id: EventId,
    /// Attendee name.
    pub user_name: String,
    /// Attendee email, lowercased.
    pub user_email: String,
    /// Attendee phone number.
    pub user_phone: Option<String>,
    /// Seats reserved.
    pub number_of_seats: i32,
    /// `number_of_seats × event.price` at booking time.
    pub total_price: i64,
    /// When the booking was placed.
    pub booking_date: DateTime<Utc>,
    /// Reservation lifecycle.
    pub status: BookingStatus,
    /// Payment lifecycle.
    pub payment_status: PaymentStatus,
    /// Reference from the external payment provider.
    pub payment_id: Option<String>,
    /// Free-text requests from the attendee.
    pub special_requests: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Attendee-supplied details for a new booking.
#[derive(Debug, Clone, Default)]
pub struct NewBooking {
    /// Attendee name (required).
    pub user_name: String,
    /// Attendee email (required, validated).
    pub user_email: String,
    /// Optional phone number.
    pub user_phone: Option<String>,
    /// Seats requested; at least 1.
    pub number_of_seats: i32,
    /// Optional free-text requests.
    pub special_requests: Option<String>,
    /// Booking date override; defaults to the creation time.
    pub booking_date: Option<DateTime<Utc>>,
}

impl NewBooking {
    /// Validates the details against `event` and builds a pending booking.
    ///
    /// The seat check here runs against the caller's snapshot of `event`;
    /// the store repeats it atomically when the booking is committed.
    ///
    /// # Errors
    ///
    /// - [`DevEventError::Validation`] for malformed details or fewer than
    ///   one seat.
    /// - [`DevEventError::InsufficientSeats`] when the snapshot already has
    ///   too few seats.
    pub fn into_booking(
        self,
        event: &Event,
        id: BookingId,
        now: DateTime<Utc>,
    ) -> Result<Booking, DevEventError> {
        let user_name = required("user name", &self.user_name)?;
        max_chars("user name", &user_name, USER_NAME_MAX_CHARS)?;
        let user_email = email(&self.user_email)?;

        let special_requests = optional(self.special_requests.as_deref());
        if let Some(requests) = &special_requests {
            max_chars("special requests", requests, SPECIAL_REQUESTS_MAX_CHARS)?;
        }

        if self.number_of_seats < 1 {
            return Err(DevEventError::Validation(
                "must book at least 1 seat".to_string(),
            ));
        }
        if !event.has_seats_for(self.number_of_seats) {
            return Err(DevEventError::InsufficientSeats {
                requested: self.number_of_seats,
                available: event.available_seats.unwrap_or(0),
            });
        }

        let total_price = event
            .price
            .checked_mul(i64::from(self.number_of_seats))
            .ok_or_else(|| DevEventError::Validation("total price overflows".to_string()))?;

        Ok(Booking {
            id,
            event_id: event.id,
            user_name,
            user_email,
            user_phone: optional(self.user_phone.as_deref()),
            number_of_seats: self.number_of_seats,
            total_price,
            booking_date: self.booking_date.unwrap_or(now),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_id: None,
            special_requests,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::NewEvent;

    fn event(capacity: Option<i32>, price: i64) -> Event {
        let input = NewEvent {
            title: "Infra Night".to_string(),
            slug: "infra-night".to_string(),
            location: "Berlin".to_string(),
            image: "https://img.example.com/infra.png".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 11, 3),
            time: "19:00".to_string(),
            price: Some(price),
            capacity,
            ..NewEvent::default()
        };
        let Ok(event) = input.into_event(EventId::new(), Utc::now()) else {
            panic!("valid event");
        };
        event
    }

    fn details(seats: i32) -> NewBooking {
        NewBooking {
            user_name: " Ada Lovelace ".to_string(),
            user_email: "Ada@Example.org".to_string(),
            number_of_seats: seats,
            ..NewBooking::default()
        }
    }

    #[test]
    fn snapshots_total_price_and_defaults() {
        let event = event(Some(10), 20);
        let Ok(booking) = details(6).into_booking(&event, BookingId::new(), Utc::now()) else {
            panic!("valid booking");
        };
        assert_eq!(booking.total_price, 120);
        assert_eq!(booking.user_name, "Ada Lovelace");
        assert_eq!(booking.user_email, "ada@example.org");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.booking_date, booking.created_at);
    }

    #[test]
    fn zero_seats_is_a_validation_error() {
        let event = event(Some(10), 20);
        let result = details(0).into_booking(&event, BookingId::new(), Utc::now());
        assert!(matches!(result, Err(DevEventError::Validation(_))));
    }

    #[test]
    fn over_request_is_insufficient_seats() {
        let event = event(Some(4), 20);
        let result = details(5).into_booking(&event, BookingId::new(), Utc::now());
        assert!(matches!(
            result,
            Err(DevEventError::InsufficientSeats {
                requested: 5,
                available: 4
            })
        ));
    }

    #[test]
    fn bad_email_is_rejected() {
        let event = event(None, 0);
        let input = NewBooking {
            user_email: "not-an-email".to_string(),
            ..details(1)
        };
        assert!(input.into_booking(&event, BookingId::new(), Utc::now()).is_err());
    }

    #[test]
    fn special_requests_are_capped() {
        let event = event(None, 0);
        let input = NewBooking {
            special_requests: Some("x".repeat(SPECIAL_REQUESTS_MAX_CHARS + 1)),
            ..details(1)
        };
        assert!(input.into_booking(&event, BookingId::new(), Utc::now()).is_err());
    }
}
