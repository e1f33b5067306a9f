//! Booking DTOs for create, get, list and status operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Booking, BookingStatus, NewBooking, PaymentStatus};

/// Request body for `POST /events/{slug}/bookings`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    /// Attendee name.
    pub user_name: String,
    /// Attendee email.
    pub user_email: String,
    /// Optional phone number.
    #[serde(default)]
    pub user_phone: Option<String>,
    /// Seats to reserve (at least 1).
    pub number_of_seats: i32,
    /// Optional free-text requests (max 500 chars).
    #[serde(default)]
    pub special_requests: Option<String>,
    /// Date the booking applies to; defaults to the time of the request.
    #[serde(default)]
    pub booking_date: Option<DateTime<Utc>>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        Self {
            user_name: req.user_name,
            user_email: req.user_email,
            user_phone: req.user_phone,
            number_of_seats: req.number_of_seats,
            special_requests: req.special_requests,
            booking_date: req.booking_date,
        }
    }
}

/// Request body for `PUT /bookings/{id}/payment`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    /// Target payment status.
    pub payment_status: PaymentStatus,
    /// Payment provider reference to record.
    #[serde(default)]
    pub payment_id: Option<String>,
}

/// Public representation of a booking.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    /// Booking identifier.
    pub id: uuid::Uuid,
    /// Owning event identifier.
    pub event_id: uuid::Uuid,
    /// Attendee name.
    pub user_name: String,
    /// Attendee email.
    pub user_email: String,
    /// Attendee phone.
    pub user_phone: Option<String>,
    /// Seats reserved.
    pub number_of_seats: i32,
    /// Total price snapshotted at booking time.
    pub total_price: i64,
    /// Booking date.
    pub booking_date: DateTime<Utc>,
    /// Reservation status.
    pub status: BookingStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Payment provider reference.
    pub payment_id: Option<String>,
    /// Attendee requests.
    pub special_requests: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: *booking.id.as_uuid(),
            event_id: booking.event_id.into(),
            user_name: booking.user_name,
            user_email: booking.user_email,
            user_phone: booking.user_phone,
            number_of_seats: booking.number_of_seats,
            total_price: booking.total_price,
            booking_date: booking.booking_date,
            status: booking.status,
            payment_status: booking.payment_status,
            payment_id: booking.payment_id,
            special_requests: booking.special_requests,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Response body for `GET /events/{slug}/bookings`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingListResponse {
    /// Bookings, newest first.
    pub bookings: Vec<BookingDto>,
}
